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
use crate::error::BenchscaleError;
use crate::variables::SweepResult;
use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

/// Rendering of generated sweeps on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Json,
  Toml,
}

/// The structure printed by `bscale sweep`.
///
/// `prefix` tags generated experiment names with the active discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
  pub prefix: String,
  pub variables: SweepResult,
}

pub fn render(report: &SweepReport, format: OutputFormat) -> Result<String, BenchscaleError> {
  let rendered = match format {
    OutputFormat::Json => serde_json::to_string(report)?,
    OutputFormat::Toml => toml::to_string_pretty(report)?,
  };
  Ok(rendered)
}
