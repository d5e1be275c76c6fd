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
//! Strong, weak and throughput scaling as policies over [`scale_variables`].
use crate::error::ScalingError;
use crate::sweep::scale_variables;
use crate::variables::SweepResult;
use crate::variables::VariableSet;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// A scaling discipline: which variable groups grow together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
  /// Fixed problem size, growing resources.
  Strong,
  /// Resources and problem size grow together.
  Weak,
  /// Growing problem size, fixed resources.
  Throughput,
}

impl Discipline {
  pub const ALL: [Discipline; 3] = [Discipline::Strong, Discipline::Weak, Discipline::Throughput];

  pub fn as_str(&self) -> &'static str {
    match self {
      Discipline::Strong => "strong",
      Discipline::Weak => "weak",
      Discipline::Throughput => "throughput",
    }
  }

  /// Prefix used to tag generated experiment names, empty when inactive.
  pub fn helper_name_prefix(&self, active: bool) -> &'static str {
    if !active {
      return "";
    }
    match self {
      Discipline::Strong => "strong_scaling",
      Discipline::Weak => "weak_scaling",
      Discipline::Throughput => "throughput_scaling",
    }
  }

  /// Runs the sweep for this discipline over the given groups.
  ///
  /// Groups a discipline does not scale are ignored.
  pub fn generate(
    &self,
    resource: &VariableSet,
    problem_size: &VariableSet,
    factor: i64,
    count: usize,
  ) -> Result<SweepResult, ScalingError> {
    tracing::info!(discipline = %self, factor, count, "Generating scaling parameters");
    match self {
      Discipline::Strong => strong_scaling(resource, factor, count),
      Discipline::Weak => weak_scaling(resource, problem_size, factor, count),
      Discipline::Throughput => throughput_scaling(problem_size, factor, count),
    }
  }
}

impl fmt::Display for Discipline {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Scales the resource group alone. The problem size stays constant.
pub fn strong_scaling(
  resource: &VariableSet,
  factor: i64,
  count: usize,
) -> Result<SweepResult, ScalingError> {
  scale_variables(resource, factor, count, None)
}

/// Scales resource and problem-size groups together.
///
/// The groups are merged with [`VariableSet::merge`] and the scaling order
/// is always driven by the first resource variable.
pub fn weak_scaling(
  resource: &VariableSet,
  problem_size: &VariableSet,
  factor: i64,
  count: usize,
) -> Result<SweepResult, ScalingError> {
  let merged = VariableSet::merge(resource, problem_size);
  scale_variables(&merged, factor, count, resource.first_name())
}

/// Scales the problem-size group alone. Resources stay constant.
pub fn throughput_scaling(
  problem_size: &VariableSet,
  factor: i64,
  count: usize,
) -> Result<SweepResult, ScalingError> {
  scale_variables(problem_size, factor, count, None)
}
