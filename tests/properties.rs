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
use benchscale::discipline::strong_scaling;
use benchscale::discipline::weak_scaling;
use benchscale::planner::scaling_order;
use benchscale::sweep::scale_variables;
use benchscale::variables::SweepValue;
use benchscale::variables::VariableName;
use benchscale::variables::VariableSet;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

const ROUNDS: usize = 200;

fn component_names(prefix: &str, dims: usize) -> Vec<String> {
  (0..dims).map(|d| format!("{prefix}{d}")).collect()
}

fn random_vector(rng: &mut StdRng, dims: usize) -> Vec<i64> {
  (0..dims).map(|_| rng.random_range(1..=8)).collect()
}

/// Number of times `base` was multiplied by `factor` to reach `last`.
fn times_scaled(base: i64, last: i64, factor: i64) -> u32 {
  let mut ratio = last / base;
  let mut n = 0;
  while ratio > 1 {
    assert_eq!(ratio % factor, 0);
    ratio /= factor;
    n += 1;
  }
  n
}

#[test]
fn test_order_is_rotation_from_minimum() {
  let mut rng = StdRng::seed_from_u64(0x5ca1e);
  for _ in 0..ROUNDS {
    let dims = rng.random_range(1..=6);
    let values = random_vector(&mut rng, dims);
    let name = VariableName::Tuple(component_names("d", dims));
    let mut vars = VariableSet::new();
    vars.insert(name.clone(), values.clone());

    let order = scaling_order(&vars, &name);

    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..dims).collect::<Vec<_>>());

    let min = *values.iter().min().unwrap();
    let first_min = values.iter().position(|v| *v == min).unwrap();
    assert_eq!(order[0], first_min);
    for pair in order.windows(2) {
      assert_eq!(pair[1], (pair[0] + 1) % dims);
    }
  }
}

#[test]
fn test_scalars_grow_geometrically() {
  let mut rng = StdRng::seed_from_u64(42);
  for _ in 0..ROUNDS {
    let factor = rng.random_range(1..=4);
    let count = rng.random_range(1..=10);
    let vars: VariableSet = (0..rng.random_range(1..=4_usize))
      .map(|i| (format!("s{i}"), rng.random_range(1..=100_i64)))
      .collect();

    let result = scale_variables(&vars, factor, count, None).unwrap();

    for (name, value) in vars.iter() {
      let base = value.as_slice()[0];
      let key = &name.components()[0];
      let expected: Vec<i64> = (0..count as u32).map(|e| base * factor.pow(e)).collect();
      assert_eq!(result[key.as_str()].as_slice(), expected.as_slice());
    }
  }
}

#[test]
fn test_round_robin_is_fair() {
  let mut rng = StdRng::seed_from_u64(7);
  for _ in 0..ROUNDS {
    let dims = rng.random_range(1..=4);
    let factor = rng.random_range(2..=3);
    let count = dims + 1 + rng.random_range(0..=10);
    let names = component_names("p", dims);
    let base = random_vector(&mut rng, dims);
    let name = VariableName::Tuple(names.clone());
    let mut vars = VariableSet::new();
    vars.insert(name.clone(), base.clone());

    let result = scale_variables(&vars, factor, count, Some(&name)).unwrap();

    let experiments = (count - 1) as u32;
    let floor = experiments / dims as u32;
    let ceil = experiments.div_ceil(dims as u32);
    let mut total = 0;
    for (d, component) in names.iter().enumerate() {
      let series = result[component.as_str()].as_slice();
      assert_eq!(series.len(), count);
      let n = times_scaled(base[d], series[count - 1], factor);
      assert!(n == floor || n == ceil, "dimension {d} scaled {n} times");
      total += n;
    }
    assert_eq!(total, experiments);

    let base_product: i64 = base.iter().product();
    let last_product: i64 = names
      .iter()
      .map(|c| result[c.as_str()].as_slice()[count - 1])
      .product();
    assert_eq!(last_product, base_product * factor.pow(experiments));
  }
}

#[test]
fn test_single_experiment_is_identity() {
  let mut rng = StdRng::seed_from_u64(1);
  for _ in 0..ROUNDS {
    let dims = rng.random_range(1..=4);
    let mut vars = VariableSet::new();
    vars.insert(
      VariableName::Tuple(component_names("r", dims)),
      random_vector(&mut rng, dims),
    );
    vars.insert("nx", rng.random_range(1..=64_i64));

    let result = scale_variables(&vars, rng.random_range(1..=9), 1, None).unwrap();

    for (name, value) in vars.iter() {
      for (component, base) in name.components().iter().zip(value.as_slice()) {
        assert_eq!(result[component.as_str()], SweepValue::Single(*base));
      }
    }
  }
}

#[test]
fn test_weak_without_problem_size_equals_strong() {
  let mut rng = StdRng::seed_from_u64(99);
  for _ in 0..ROUNDS {
    let dims = rng.random_range(1..=4);
    let mut resource = VariableSet::new();
    resource.insert(
      VariableName::Tuple(component_names("n", dims)),
      random_vector(&mut rng, dims),
    );
    if rng.random_bool(0.5) {
      resource.insert("threads", rng.random_range(1..=16_i64));
    }
    let factor = rng.random_range(1..=3);
    let count = rng.random_range(1..=8);

    assert_eq!(
      weak_scaling(&resource, &VariableSet::new(), factor, count).unwrap(),
      strong_scaling(&resource, factor, count).unwrap()
    );
  }
}
