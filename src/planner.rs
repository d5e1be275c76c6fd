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
//! Round-robin scaling order over the dimensions of a driver variable.
use crate::variables::VariableName;
use crate::variables::VariableSet;
use crate::variables::VariableValue;

/// Dimension indices in the order they are scaled, one per dimension.
pub type ScalingOrder = Vec<usize>;

/// Computes the order in which dimensions are scaled across experiments.
///
/// The dimension count is taken from the first vector-valued entry of
/// `variables` (one if there is none). The rotation starts at the smallest
/// dimension of `driver`, the first one on ties, and walks upward, wrapping
/// around. A scalar or missing driver starts at dimension 0.
pub fn scaling_order(variables: &VariableSet, driver: &VariableName) -> ScalingOrder {
  let dims = variables
    .values()
    .find_map(|value| match value {
      VariableValue::Vector(values) => Some(values.len()),
      VariableValue::Scalar(_) => None,
    })
    .unwrap_or(1)
    .max(1);

  let start = match variables.get(driver) {
    Some(VariableValue::Vector(values)) => values
      .iter()
      .enumerate()
      .min_by_key(|(_, value)| **value)
      .map_or(0, |(idx, _)| idx),
    _ => 0,
  };

  (0..dims).map(|i| (start + i) % dims).collect()
}
