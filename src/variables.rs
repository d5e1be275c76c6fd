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
//! Typed variable sets handed to the scaling engine.
//!
//! A variable is either a single named integer (`nodes = 4`) or a tuple of
//! component names bound to one integer per component
//! (`(n_nodes, n_ranks) = [1, 8]`). The number of components is the
//! variable's dimensionality.
use crate::error::EXPECTED_SCALAR;
use crate::error::EXPECTED_TUPLE;
use crate::error::ScalingError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use std::fmt;

/// Name of a variable: one identifier, or an ordered tuple of identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum VariableName {
  Scalar(String),
  Tuple(Vec<String>),
}

impl VariableName {
  /// Component names in order. A scalar name is its own single component.
  pub fn components(&self) -> &[String] {
    match self {
      VariableName::Scalar(name) => std::slice::from_ref(name),
      VariableName::Tuple(names) => names,
    }
  }

  pub fn is_tuple(&self) -> bool {
    matches!(self, VariableName::Tuple(_))
  }
}

impl fmt::Display for VariableName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VariableName::Scalar(name) => f.write_str(name),
      VariableName::Tuple(names) => write!(f, "({})", names.join(", ")),
    }
  }
}

impl From<&str> for VariableName {
  fn from(name: &str) -> Self {
    VariableName::Scalar(name.to_string())
  }
}

impl From<String> for VariableName {
  fn from(name: String) -> Self {
    VariableName::Scalar(name)
  }
}

impl<const N: usize> From<[&str; N]> for VariableName {
  fn from(names: [&str; N]) -> Self {
    VariableName::Tuple(names.iter().map(|s| s.to_string()).collect())
  }
}

impl From<Vec<String>> for VariableName {
  fn from(names: Vec<String>) -> Self {
    VariableName::Tuple(names)
  }
}

impl TryFrom<serde_json::Value> for VariableName {
  type Error = ScalingError;

  fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
    match value {
      serde_json::Value::String(name) => Ok(VariableName::Scalar(name)),
      serde_json::Value::Array(items) => {
        let names: Option<Vec<String>> = items
          .iter()
          .map(|item| item.as_str().map(str::to_string))
          .collect();
        names
          .map(VariableName::Tuple)
          .ok_or_else(|| ScalingError::InvalidName(serde_json::Value::Array(items).to_string()))
      }
      other => Err(ScalingError::InvalidName(other.to_string())),
    }
  }
}

impl<'de> Deserialize<'de> for VariableName {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    VariableName::try_from(value).map_err(serde::de::Error::custom)
  }
}

/// Value of a variable, checked once at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
  Scalar(i64),
  Vector(Vec<i64>),
}

impl VariableValue {
  /// Converts an untyped value bound to `name`.
  ///
  /// Only integers and flat lists of integers are accepted. Whether the shape
  /// agrees with the name is checked later by [`crate::sweep::validate`].
  pub fn from_json(name: &VariableName, value: serde_json::Value) -> Result<Self, ScalingError> {
    let expected = if name.is_tuple() {
      EXPECTED_TUPLE
    } else {
      EXPECTED_SCALAR
    };
    let mismatch = || ScalingError::TypeMismatch {
      name: name.clone(),
      expected,
    };

    match value {
      serde_json::Value::Number(n) => n.as_i64().map(VariableValue::Scalar).ok_or_else(mismatch),
      serde_json::Value::Array(items) => items
        .iter()
        .map(serde_json::Value::as_i64)
        .collect::<Option<Vec<_>>>()
        .map(VariableValue::Vector)
        .ok_or_else(mismatch),
      _ => Err(mismatch()),
    }
  }

  /// Per-dimension base values. A scalar has one implicit dimension.
  pub fn as_slice(&self) -> &[i64] {
    match self {
      VariableValue::Scalar(v) => std::slice::from_ref(v),
      VariableValue::Vector(values) => values,
    }
  }
}

impl From<i64> for VariableValue {
  fn from(value: i64) -> Self {
    VariableValue::Scalar(value)
  }
}

impl From<Vec<i64>> for VariableValue {
  fn from(values: Vec<i64>) -> Self {
    VariableValue::Vector(values)
  }
}

impl<const N: usize> From<[i64; N]> for VariableValue {
  fn from(values: [i64; N]) -> Self {
    VariableValue::Vector(values.to_vec())
  }
}

/// One `{ name, value }` entry as written in config files and CLI arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableEntry {
  pub name: VariableName,
  pub value: serde_json::Value,
}

/// Insertion-ordered mapping from variable names to values.
///
/// Order matters: the first entry is the default driver of a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet {
  entries: IndexMap<VariableName, VariableValue>,
}

impl VariableSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a set from untyped entries, rejecting non-integer values.
  pub fn try_from_entries<I>(entries: I) -> Result<Self, ScalingError>
  where
    I: IntoIterator<Item = VariableEntry>,
  {
    let mut set = VariableSet::new();
    for VariableEntry { name, value } in entries {
      let value = VariableValue::from_json(&name, value)?;
      set.insert(name, value);
    }
    Ok(set)
  }

  /// Inserts or replaces an entry. A replaced entry keeps its position.
  pub fn insert(
    &mut self,
    name: impl Into<VariableName>,
    value: impl Into<VariableValue>,
  ) -> Option<VariableValue> {
    self.entries.insert(name.into(), value.into())
  }

  pub fn get(&self, name: &VariableName) -> Option<&VariableValue> {
    self.entries.get(name)
  }

  pub fn contains(&self, name: &VariableName) -> bool {
    self.entries.contains_key(name)
  }

  pub fn first_name(&self) -> Option<&VariableName> {
    self.entries.keys().next()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&VariableName, &VariableValue)> {
    self.entries.iter()
  }

  pub fn values(&self) -> impl Iterator<Item = &VariableValue> {
    self.entries.values()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Unions a resource group with a problem-size group.
  ///
  /// Resource entries come first and win on a name collision; colliding
  /// problem-size entries are dropped.
  pub fn merge(resource: &VariableSet, problem_size: &VariableSet) -> VariableSet {
    let mut merged = resource.clone();
    for (name, value) in problem_size.iter() {
      if merged.contains(name) {
        tracing::warn!(variable = %name, "Problem-size variable shadowed by resource variable");
        continue;
      }
      merged.entries.insert(name.clone(), value.clone());
    }
    merged
  }
}

impl<N, V> FromIterator<(N, V)> for VariableSet
where
  N: Into<VariableName>,
  V: Into<VariableValue>,
{
  fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
    let mut set = VariableSet::new();
    for (name, value) in iter {
      set.insert(name, value);
    }
    set
  }
}

/// Values of one output variable across every experiment.
///
/// A single experiment collapses to a bare integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SweepValue {
  Single(i64),
  Series(Vec<i64>),
}

impl SweepValue {
  pub fn from_series(mut series: Vec<i64>) -> Self {
    if series.len() == 1 {
      SweepValue::Single(series.remove(0))
    } else {
      SweepValue::Series(series)
    }
  }

  pub fn as_slice(&self) -> &[i64] {
    match self {
      SweepValue::Single(v) => std::slice::from_ref(v),
      SweepValue::Series(values) => values,
    }
  }
}

/// Output of a sweep keyed by component name, in input order.
pub type SweepResult = IndexMap<String, SweepValue>;
