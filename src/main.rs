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
use Commands::Order;
use Commands::Sweep;
use anyhow::Context;
use anyhow::Result;
use benchscale::cli::Cli;
use benchscale::cli::Commands;
use benchscale::config::Experiment;
use benchscale::config::OrderRequest;
use benchscale::logging::setup_tracing;
use benchscale::output::SweepReport;
use benchscale::output::render;
use clap::Parser;

fn main() -> Result<()> {
  let _log_guard = setup_tracing()?;

  let Cli { command } = Cli::parse();
  let main_span = tracing::info_span!("bscale");
  let _enter = main_span.enter();

  match command {
    Sweep(sweep_args) => {
      let format = sweep_args.format;
      let experiment = Experiment::try_from(sweep_args).context("Invalid experiment configuration")?;

      let variables = experiment
        .generate()
        .context("Failed to generate scaling parameters")?;
      tracing::info!(
        discipline = %experiment.discipline,
        variables = variables.len(),
        "Sweep generated"
      );

      let report = SweepReport {
        prefix: experiment.name_prefix().to_string(),
        variables,
      };
      println!("{}", render(&report, format)?);
    }
    Order(order_args) => {
      let request = OrderRequest::try_from(order_args).context("Invalid order request")?;
      println!("{}", serde_json::to_string(&request.scaling_order())?);
    }
  }

  Ok(())
}
