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
//! The sweep generator: validates a variable set and expands it into one
//! value per experiment for every component.
use crate::error::EXPECTED_SCALAR;
use crate::error::EXPECTED_TUPLE;
use crate::error::ScalingError;
use crate::planner::scaling_order;
use crate::variables::SweepResult;
use crate::variables::SweepValue;
use crate::variables::VariableName;
use crate::variables::VariableSet;
use crate::variables::VariableValue;

/// Checks that every entry's value matches the shape of its name and that
/// all vector-valued entries share one dimensionality.
///
/// Returns the shared dimensionality, or `None` when the set only holds
/// scalars. Scalars never constrain it.
pub fn validate(variables: &VariableSet) -> Result<Option<usize>, ScalingError> {
  for (name, value) in variables.iter() {
    match (name, value) {
      (VariableName::Scalar(_), VariableValue::Scalar(_)) => {}
      (VariableName::Scalar(_), VariableValue::Vector(_)) => {
        return Err(ScalingError::TypeMismatch {
          name: name.clone(),
          expected: EXPECTED_SCALAR,
        });
      }
      (VariableName::Tuple(_), VariableValue::Scalar(_)) => {
        return Err(ScalingError::TypeMismatch {
          name: name.clone(),
          expected: EXPECTED_TUPLE,
        });
      }
      (VariableName::Tuple(names), VariableValue::Vector(values)) => {
        if names.is_empty() || names.len() != values.len() {
          return Err(ScalingError::ShapeMismatch {
            name: name.clone(),
            name_len: names.len(),
            value_len: values.len(),
          });
        }
      }
    }
  }

  let mut dims = None;
  for (name, value) in variables.iter() {
    let VariableValue::Vector(values) = value else {
      continue;
    };
    match dims {
      None => dims = Some(values.len()),
      Some(expected) if expected != values.len() => {
        return Err(ScalingError::DimensionMismatch {
          name: name.clone(),
          expected,
          found: values.len(),
        });
      }
      Some(_) => {}
    }
  }

  Ok(dims)
}

/// Expands `variables` into `count` experiments, scaling by `factor`.
///
/// The first experiment holds the base values. Each following experiment
/// multiplies exactly one dimension of every multi-dimensional variable,
/// chosen round-robin by [`scaling_order`] for `driver` (the first entry when
/// `None`). Single-dimension variables are multiplied on every experiment.
///
/// Tuple variables are unpacked into one output key per component. With a
/// single experiment every output is a bare integer.
pub fn scale_variables(
  variables: &VariableSet,
  factor: i64,
  count: usize,
  driver: Option<&VariableName>,
) -> Result<SweepResult, ScalingError> {
  let Some(default_driver) = variables.first_name() else {
    return Ok(SweepResult::new());
  };
  let driver = driver.unwrap_or(default_driver);

  if !variables.contains(driver) {
    return Err(ScalingError::InvalidDriver {
      driver: driver.clone(),
    });
  }

  let dims = validate(variables)?;

  let span = tracing::debug_span!("scale_variables", factor, count, %driver);
  let _enter = span.enter();

  let order = scaling_order(variables, driver);
  tracing::debug!(?dims, ?order, "Computed scaling order");

  let mut series: Vec<(&VariableName, Vec<Vec<i64>>)> = variables
    .iter()
    .map(|(name, value)| {
      let per_dim = value.as_slice().iter().map(|base| vec![*base]).collect();
      (name, per_dim)
    })
    .collect();

  for experiment in 0..count.saturating_sub(1) {
    let selected = order[experiment % order.len()];
    tracing::trace!(experiment = experiment + 1, selected, "Scaling dimension");

    for (name, per_dim) in series.iter_mut() {
      let single = per_dim.len() == 1;
      for (dim, values) in per_dim.iter_mut().enumerate() {
        let last = values[values.len() - 1];
        let next = if single || dim == selected {
          last
            .checked_mul(factor)
            .ok_or_else(|| ScalingError::Overflow {
              name: name.components()[dim].clone(),
              experiment: experiment + 1,
            })?
        } else {
          last
        };
        values.push(next);
      }
    }
  }

  let mut result = SweepResult::new();
  for (name, per_dim) in series {
    for (component, values) in name.components().iter().zip(per_dim) {
      result.insert(component.clone(), SweepValue::from_series(values));
    }
  }

  tracing::debug!(outputs = result.len(), "Sweep generated");
  Ok(result)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn series(result: &SweepResult, key: &str) -> Vec<i64> {
    result[key].as_slice().to_vec()
  }

  #[test]
  fn test_nodes_and_scalar_example() {
    let mut vars = VariableSet::new();
    vars.insert(["n_nodes", "n_ranks"], [1_i64, 4]);
    vars.insert("x", 10_i64);

    let result = scale_variables(&vars, 2, 3, Some(&VariableName::from(["n_nodes", "n_ranks"])))
      .unwrap();

    let keys: Vec<&str> = result.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["n_nodes", "n_ranks", "x"]);
    assert_eq!(series(&result, "n_nodes"), vec![1, 2, 2]);
    assert_eq!(series(&result, "n_ranks"), vec![4, 4, 8]);
    assert_eq!(series(&result, "x"), vec![10, 20, 40]);
  }

  #[test]
  fn test_empty_set_returns_empty_result() {
    let result = scale_variables(&VariableSet::new(), 2, 5, None).unwrap();
    assert!(result.is_empty());
  }

  #[test]
  fn test_empty_set_ignores_driver() {
    let driver = VariableName::from("missing");
    let result = scale_variables(&VariableSet::new(), 2, 5, Some(&driver)).unwrap();
    assert!(result.is_empty());
  }

  #[test]
  fn test_invalid_driver() {
    let vars: VariableSet = [("nodes", 1_i64)].into_iter().collect();
    let driver = VariableName::from("missing");
    assert_eq!(
      scale_variables(&vars, 2, 3, Some(&driver)),
      Err(ScalingError::InvalidDriver { driver })
    );
  }

  #[test]
  fn test_single_experiment_returns_base_values() {
    let mut vars = VariableSet::new();
    vars.insert(["px", "py"], [3_i64, 5]);
    vars.insert("nx", 7_i64);

    for count in [0, 1] {
      let result = scale_variables(&vars, 10, count, None).unwrap();
      assert_eq!(result["px"], SweepValue::Single(3));
      assert_eq!(result["py"], SweepValue::Single(5));
      assert_eq!(result["nx"], SweepValue::Single(7));
    }
  }

  #[test]
  fn test_scalar_name_with_vector_value() {
    let mut vars = VariableSet::new();
    vars.insert("nodes", [1_i64, 2]);
    assert_eq!(
      scale_variables(&vars, 2, 3, None),
      Err(ScalingError::TypeMismatch {
        name: VariableName::from("nodes"),
        expected: EXPECTED_SCALAR,
      })
    );
  }

  #[test]
  fn test_tuple_name_with_scalar_value() {
    let mut vars = VariableSet::new();
    vars.insert(["px", "py"], 4_i64);
    assert_eq!(
      scale_variables(&vars, 2, 3, None),
      Err(ScalingError::TypeMismatch {
        name: VariableName::from(["px", "py"]),
        expected: EXPECTED_TUPLE,
      })
    );
  }

  #[test]
  fn test_name_value_length_mismatch() {
    let mut vars = VariableSet::new();
    vars.insert(["px", "py", "pz"], [1_i64, 2]);
    assert_eq!(
      scale_variables(&vars, 2, 3, None),
      Err(ScalingError::ShapeMismatch {
        name: VariableName::from(["px", "py", "pz"]),
        name_len: 3,
        value_len: 2,
      })
    );
  }

  #[test]
  fn test_empty_tuple_name_rejected() {
    let mut vars = VariableSet::new();
    vars.insert(VariableName::Tuple(Vec::new()), Vec::<i64>::new());
    assert!(matches!(
      scale_variables(&vars, 2, 3, None),
      Err(ScalingError::ShapeMismatch { name_len: 0, .. })
    ));
  }

  #[test]
  fn test_dimension_mismatch_between_variables() {
    let mut vars = VariableSet::new();
    vars.insert(["px", "py"], [1_i64, 2]);
    vars.insert(["qx", "qy", "qz"], [1_i64, 2, 3]);
    assert_eq!(
      scale_variables(&vars, 2, 3, None),
      Err(ScalingError::DimensionMismatch {
        name: VariableName::from(["qx", "qy", "qz"]),
        expected: 2,
        found: 3,
      })
    );
  }

  #[test]
  fn test_shape_errors_reported_before_dimension_errors() {
    let mut vars = VariableSet::new();
    vars.insert(["px", "py"], [1_i64, 2]);
    vars.insert(["qx", "qy", "qz"], [1_i64, 2, 3]);
    vars.insert("nodes", [1_i64]);
    assert!(matches!(
      scale_variables(&vars, 2, 3, None),
      Err(ScalingError::TypeMismatch { .. })
    ));
  }

  #[test]
  fn test_scalars_do_not_constrain_dimensions() {
    let mut vars = VariableSet::new();
    vars.insert("nx", 100_i64);
    vars.insert(["px", "py", "pz"], [1_i64, 1, 1]);
    assert_eq!(validate(&vars), Ok(Some(3)));

    let result = scale_variables(&vars, 2, 4, None).unwrap();
    assert_eq!(series(&result, "nx"), vec![100, 200, 400, 800]);
    assert_eq!(series(&result, "px"), vec![1, 2, 2, 2]);
    assert_eq!(series(&result, "py"), vec![1, 1, 2, 2]);
    assert_eq!(series(&result, "pz"), vec![1, 1, 1, 2]);
  }

  #[test]
  fn test_driver_anchors_rotation() {
    let mut vars = VariableSet::new();
    vars.insert(["px", "py"], [1_i64, 1]);
    vars.insert(["nx", "ny"], [64_i64, 32]);

    let driver = VariableName::from(["nx", "ny"]);
    let result = scale_variables(&vars, 2, 4, Some(&driver)).unwrap();
    assert_eq!(series(&result, "px"), vec![1, 1, 2, 2]);
    assert_eq!(series(&result, "py"), vec![1, 2, 2, 4]);
    assert_eq!(series(&result, "nx"), vec![64, 64, 128, 128]);
    assert_eq!(series(&result, "ny"), vec![32, 64, 64, 128]);
  }

  #[test]
  fn test_one_component_tuple_scales_every_experiment() {
    let mut vars = VariableSet::new();
    vars.insert(["px", "py"], [1_i64, 1]);
    vars.insert(["nodes"], [3_i64]);
    let result = scale_variables(&vars, 3, 3, None);
    // A one-component tuple disagrees with the shared dimensionality.
    assert!(matches!(result, Err(ScalingError::DimensionMismatch { .. })));

    let vars: VariableSet = [(["nodes"], [3_i64])].into_iter().collect();
    let result = scale_variables(&vars, 3, 3, None).unwrap();
    assert_eq!(series(&result, "nodes"), vec![3, 9, 27]);
  }

  #[test]
  fn test_overflow_is_reported() {
    let vars: VariableSet = [("big", i64::MAX / 2)].into_iter().collect();
    assert_eq!(
      scale_variables(&vars, 4, 3, None),
      Err(ScalingError::Overflow {
        name: "big".to_string(),
        experiment: 1,
      })
    );
  }

  #[test]
  fn test_repeated_component_overwrites_in_place() {
    let mut vars = VariableSet::new();
    vars.insert("x", 1_i64);
    vars.insert("y", 5_i64);
    vars.insert(["x"], [7_i64]);

    let result = scale_variables(&vars, 2, 2, None).unwrap();
    let keys: Vec<&str> = result.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["x", "y"]);
    assert_eq!(series(&result, "x"), vec![7, 14]);
  }
}
