use crate::output::OutputFormat;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Parameter-sweep generator for benchmark scaling studies")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Generate per-experiment variable values for one scaling discipline.
  Sweep(SweepArgs),

  /// Print the round-robin order in which dimensions are scaled.
  Order(OrderArgs),
}

#[derive(Debug, Args)]
pub struct SweepArgs {
  /// Experiment description in TOML. Values here are overridden by
  /// `BSCALE_*` environment variables and then by the flags below.
  #[arg(long, short)]
  pub config: Option<PathBuf>,

  /// Strong scaling: grow the resource variables only.
  #[arg(long, conflicts_with_all = ["weak", "throughput"])]
  pub strong: bool,

  /// Weak scaling: grow resource and problem-size variables together.
  #[arg(long, conflicts_with = "throughput")]
  pub weak: bool,

  /// Throughput scaling: grow the problem-size variables only.
  #[arg(long)]
  pub throughput: bool,

  /// Factor by which to scale values of problem variables.
  #[arg(long)]
  pub factor: Option<i64>,

  /// Number of experiments to be generated.
  #[arg(long)]
  pub iterations: Option<usize>,

  /// JSON list of resource variables.
  /// Example: '[{"name": ["n_nodes", "n_ranks"], "value": [1, 4]}]'
  #[arg(long)]
  pub resource: Option<String>,

  /// JSON list of problem-size variables.
  /// Example: '[{"name": "nx", "value": 128}]'
  #[arg(long)]
  pub problem_size: Option<String>,

  #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
  pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct OrderArgs {
  /// JSON list of variables, in the same form as `sweep --resource`.
  #[arg(long, required = true)]
  pub variables: String,

  /// Driver variable: a plain name, or a JSON list for a tuple name.
  /// Defaults to the first variable.
  #[arg(long)]
  pub driver: Option<String>,
}
