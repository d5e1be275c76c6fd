// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use crate::variables::VariableName;
use std::path::PathBuf;
use thiserror::Error;

/// Expected shape reported when a scalar name maps to anything but an integer.
pub const EXPECTED_SCALAR: &str = "scalar->integer";

/// Expected shape reported when a tuple name maps to anything but a list of integers.
pub const EXPECTED_TUPLE: &str = "tuple->sequence of integers";

/// Top-level error enum for the benchscale library.
#[derive(Error, Debug)]
pub enum BenchscaleError {
  #[error("Scaling failed")]
  Scaling(#[from] ScalingError),

  #[error("Configuration error")]
  Config(#[from] ConfigError),

  #[error("JSON serialization error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("TOML serialization error: {0}")]
  Toml(#[from] toml::ser::Error),
}

/// Input errors raised by the scaling engine (src/sweep.rs, src/variables.rs).
///
/// Every variant describes a mistake in the caller's variable set. None of
/// them is transient, so nothing here is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScalingError {
  #[error("Invalid driver variable: '{driver}' is not in the variable set")]
  InvalidDriver { driver: VariableName },

  #[error("Type mismatch for '{name}': expected {expected}")]
  TypeMismatch {
    name: VariableName,
    expected: &'static str,
  },

  #[error(
    "Length mismatch between name and value for '{name}': name has {name_len} components, value has {value_len}"
  )]
  ShapeMismatch {
    name: VariableName,
    name_len: usize,
    value_len: usize,
  },

  #[error(
    "Dimension mismatch between variables: '{name}' has {found} dimensions, expected {expected}"
  )]
  DimensionMismatch {
    name: VariableName,
    expected: usize,
    found: usize,
  },

  #[error("Integer overflow while scaling '{name}' at experiment {experiment}")]
  Overflow { name: String, experiment: usize },

  #[error("Invalid variable name {0}. Expected a string or a list of strings")]
  InvalidName(String),
}

/// Errors related to configuration resolution (src/config.rs).
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Experiment config file not found: {0}")]
  ConfigFileNotFound(PathBuf),

  #[error("Failed to extract configuration")]
  Extract(#[source] Box<figment::Error>),

  #[error("Failed to parse --{flag} JSON")]
  ParseVariables {
    flag: &'static str,
    #[source]
    source: serde_json::Error,
  },

  #[error("Invalid variables in the '{group}' group")]
  Variables {
    group: &'static str,
    #[source]
    source: ScalingError,
  },

  #[error(
    "Exactly one scaling discipline must be enabled (strong, weak or throughput), found: {active:?}"
  )]
  Discipline { active: Vec<&'static str> },

  #[error("Scaling factor must be at least 1, got {0}")]
  Factor(i64),
}

impl From<figment::Error> for ConfigError {
  fn from(err: figment::Error) -> Self {
    ConfigError::Extract(Box::new(err))
  }
}
