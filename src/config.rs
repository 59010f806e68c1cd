use std::fmt;

use serde::Deserialize;
use config::{builder::DefaultState, ConfigBuilder, ConfigError, File};


#[derive(Debug, Clone, Deserialize)]
pub struct ConfigHeader {
    msg: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Path stem of the dataset: `<stem>.tsv` is the source and
    /// `<stem>.json` the cache written next to it.
    pub path: String,
    /// Categories dropped before training (aggregate buckets that would
    /// pollute the label set).
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SplitConfig {
    pub test_fraction: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// Number of evenly spaced thresholds for the ROC sweep.
    pub roc_steps: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub header: ConfigHeader,
    pub dataset: DatasetConfig,
    pub split: SplitConfig,
    pub evaluation: EvaluationConfig,
    pub logging: LoggingConfig,
}
impl Config {
    pub fn new() -> Result<Self, ConfigError> {
    // Builder
    let mut builder: ConfigBuilder<DefaultState> = ConfigBuilder::default();

    // Start off by merging in the "default" configuration file
    builder = builder.add_source(File::with_name("config"));

    // Build the configuration
    let config = builder.build()
        .map_err(|e| {
            return ConfigError::FileParse { uri: Some(e.to_string()), cause: Box::new(e) }
        })?;

    // Deserialize the configuration into our Config struct
    // return it
    config.try_deserialize()

    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.header.msg)
    }
}
