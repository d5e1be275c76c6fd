use crate::cli::OrderArgs;
use crate::cli::SweepArgs;
use crate::discipline::Discipline;
use crate::error::ConfigError;
use crate::error::ScalingError;
use crate::planner::ScalingOrder;
use crate::planner::scaling_order;
use crate::variables::SweepResult;
use crate::variables::VariableEntry;
use crate::variables::VariableName;
use crate::variables::VariableSet;
use figment::Figment;
use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Serialized;
use figment::providers::Toml;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

/// Prefix of environment variables that override the experiment file.
pub const ENV_PREFIX: &str = "BSCALE_";

// --- Default Values ---
fn default_scaling_factor() -> i64 {
  2
}

fn default_scaling_iterations() -> usize {
  4
}

/// Experiment description as written in TOML, before validation.
///
/// ```toml
/// scaling_factor = 2
/// scaling_iterations = 4
/// weak = true
///
/// [[resource]]
/// name = ["n_nodes", "n_ranks"]
/// value = [1, 4]
///
/// [[problem_size]]
/// name = "nx"
/// value = 128
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingConfig {
  #[serde(default = "default_scaling_factor")]
  pub scaling_factor: i64,

  #[serde(default = "default_scaling_iterations")]
  pub scaling_iterations: usize,

  #[serde(default)]
  pub strong: bool,

  #[serde(default)]
  pub weak: bool,

  #[serde(default)]
  pub throughput: bool,

  #[serde(default)]
  pub resource: Vec<VariableEntry>,

  #[serde(default)]
  pub problem_size: Vec<VariableEntry>,
}

impl Default for ScalingConfig {
  fn default() -> Self {
    ScalingConfig {
      scaling_factor: default_scaling_factor(),
      scaling_iterations: default_scaling_iterations(),
      strong: false,
      weak: false,
      throughput: false,
      resource: Vec::new(),
      problem_size: Vec::new(),
    }
  }
}

impl ScalingConfig {
  /// Defaults, then the optional TOML file, then `BSCALE_*` variables.
  pub fn figment(config_file: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(ScalingConfig::default()));
    if let Some(path) = config_file {
      figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed(ENV_PREFIX))
  }

  pub fn is_active(&self, discipline: Discipline) -> bool {
    match discipline {
      Discipline::Strong => self.strong,
      Discipline::Weak => self.weak,
      Discipline::Throughput => self.throughput,
    }
  }

  pub fn active_disciplines(&self) -> Vec<Discipline> {
    Discipline::ALL
      .into_iter()
      .filter(|d| self.is_active(*d))
      .collect()
  }

  /// Experiment name prefix of the first active discipline, if any.
  pub fn name_prefix(&self) -> &'static str {
    Discipline::ALL
      .into_iter()
      .map(|d| d.helper_name_prefix(self.is_active(d)))
      .find(|prefix| !prefix.is_empty())
      .unwrap_or("")
  }
}

/// Command-line values layered on top of the file and environment.
#[derive(Debug, Default, Serialize)]
struct Overrides {
  #[serde(skip_serializing_if = "Option::is_none")]
  scaling_factor: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  scaling_iterations: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  strong: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  weak: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  throughput: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  resource: Option<Vec<VariableEntry>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  problem_size: Option<Vec<VariableEntry>>,
}

/// Parses a JSON list of `{ "name", "value" }` entries.
pub fn parse_entries(flag: &'static str, json: &str) -> Result<Vec<VariableEntry>, ConfigError> {
  serde_json::from_str(json).map_err(|source| ConfigError::ParseVariables { flag, source })
}

/// Parses a driver given as a plain name or as a JSON list of names.
pub fn parse_driver(raw: &str) -> Result<VariableName, ConfigError> {
  if raw.trim_start().starts_with('[') {
    serde_json::from_str(raw).map_err(|source| ConfigError::ParseVariables {
      flag: "driver",
      source,
    })
  } else {
    Ok(VariableName::from(raw))
  }
}

fn variable_group(
  group: &'static str,
  entries: Vec<VariableEntry>,
) -> Result<VariableSet, ConfigError> {
  VariableSet::try_from_entries(entries).map_err(|source| ConfigError::Variables { group, source })
}

/// Fully validated experiment, ready to generate.
#[derive(Debug, Clone)]
pub struct Experiment {
  pub discipline: Discipline,
  pub factor: i64,
  pub iterations: usize,
  pub resource: VariableSet,
  pub problem_size: VariableSet,
}

impl Experiment {
  pub fn name_prefix(&self) -> &'static str {
    self.discipline.helper_name_prefix(true)
  }

  pub fn generate(&self) -> Result<SweepResult, ScalingError> {
    self
      .discipline
      .generate(&self.resource, &self.problem_size, self.factor, self.iterations)
  }
}

impl TryFrom<ScalingConfig> for Experiment {
  type Error = ConfigError;

  fn try_from(config: ScalingConfig) -> Result<Self, Self::Error> {
    let active = config.active_disciplines();
    let [discipline] = active[..] else {
      return Err(ConfigError::Discipline {
        active: active.iter().map(Discipline::as_str).collect(),
      });
    };

    if config.scaling_factor < 1 {
      return Err(ConfigError::Factor(config.scaling_factor));
    }

    let ScalingConfig {
      scaling_factor,
      scaling_iterations,
      resource,
      problem_size,
      ..
    } = config;

    Ok(Experiment {
      discipline,
      factor: scaling_factor,
      iterations: scaling_iterations,
      resource: variable_group("resource", resource)?,
      problem_size: variable_group("problem_size", problem_size)?,
    })
  }
}

impl TryFrom<SweepArgs> for Experiment {
  type Error = ConfigError;

  fn try_from(
    SweepArgs {
      config,
      strong,
      weak,
      throughput,
      factor,
      iterations,
      resource,
      problem_size,
      ..
    }: SweepArgs,
  ) -> Result<Self, Self::Error> {
    if let Some(path) = &config
      && !path.exists()
    {
      return Err(ConfigError::ConfigFileNotFound(path.clone()));
    }

    // A discipline flag replaces whatever the file or environment enabled.
    let any_discipline = strong || weak || throughput;
    let overrides = Overrides {
      scaling_factor: factor,
      scaling_iterations: iterations,
      strong: any_discipline.then_some(strong),
      weak: any_discipline.then_some(weak),
      throughput: any_discipline.then_some(throughput),
      resource: resource
        .as_deref()
        .map(|json| parse_entries("resource", json))
        .transpose()?,
      problem_size: problem_size
        .as_deref()
        .map(|json| parse_entries("problem-size", json))
        .transpose()?,
    };

    let config: ScalingConfig = ScalingConfig::figment(config.as_deref())
      .merge(Serialized::defaults(overrides))
      .extract()?;
    tracing::debug!(?config, "Resolved scaling configuration");

    Experiment::try_from(config)
  }
}

/// Variables and driver for the `order` command.
#[derive(Debug, Clone)]
pub struct OrderRequest {
  pub variables: VariableSet,
  pub driver: Option<VariableName>,
}

impl OrderRequest {
  pub fn scaling_order(&self) -> ScalingOrder {
    match self.driver.as_ref().or(self.variables.first_name()) {
      Some(driver) => scaling_order(&self.variables, driver),
      None => vec![0],
    }
  }
}

impl TryFrom<OrderArgs> for OrderRequest {
  type Error = ConfigError;

  fn try_from(OrderArgs { variables, driver }: OrderArgs) -> Result<Self, Self::Error> {
    let variables = variable_group("variables", parse_entries("variables", &variables)?)?;
    let driver = driver.as_deref().map(parse_driver).transpose()?;
    Ok(OrderRequest { variables, driver })
  }
}
