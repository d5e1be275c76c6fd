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

//! # Benchscale
//!
//! `benchscale` generates the input values fed to successive runs of a
//! benchmark scaling study. Starting from base values, every experiment
//! multiplies one dimension of each multi-dimensional variable by a scaling
//! factor, cycling through the dimensions round-robin so that no single
//! axis (nodes, ranks per node, grid extent, ...) is scaled to extremes
//! while the others stay fixed.
//!
//! This crate contains the library behind the `bscale` CLI, but its engine
//! modules (`variables`, `planner`, `sweep`, `discipline`) have no I/O and
//! can be used directly.
//!
//! ```
//! use benchscale::sweep::scale_variables;
//! use benchscale::variables::{SweepValue, VariableSet};
//!
//! let mut vars = VariableSet::new();
//! vars.insert(["n_nodes", "n_ranks"], [1_i64, 4]);
//! vars.insert("nx", 10_i64);
//!
//! let result = scale_variables(&vars, 2, 3, None).unwrap();
//! assert_eq!(result["n_nodes"], SweepValue::Series(vec![1, 2, 2]));
//! assert_eq!(result["n_ranks"], SweepValue::Series(vec![4, 4, 8]));
//! assert_eq!(result["nx"], SweepValue::Series(vec![10, 20, 40]));
//! ```
//!
//! ## Core Modules
//!
//! * [`variables`]: Typed variable names, values and insertion-ordered sets.
//! * [`planner`]: Computes the round-robin order in which dimensions scale.
//! * [`sweep`]: Validates a variable set and expands it into experiments.
//! * [`discipline`]: Strong, weak and throughput scaling policies.
//! * [`config`]: Layers defaults, the experiment TOML file, `BSCALE_*`
//!   environment variables and CLI flags into a validated `Experiment`.
//! * [`cli`]: Defines the `clap`-based command-line interface.
//! * [`output`]: Renders sweep reports as JSON or TOML.
//! * [`error`]: Defines the custom error types for the library.
//! * [`logging`]: Provides the `setup_tracing` utility.

pub mod cli;
pub mod config;
pub mod discipline;
pub mod error;
pub mod logging;
pub mod output;
pub mod planner;
pub mod sweep;
pub mod variables;
