//! Configuration for the compliance CLI

use serde::{Deserialize, Serialize};
use tarefo_compliance::EvaluatorConfig;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "TAREFO";

/// Main CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Evaluator configuration
    #[serde(default)]
    pub compliance: EvaluatorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CliConfig {
    /// Load configuration: the optional file, then
    /// `TAREFO_<SECTION>__<KEY>` environment variables. Anything left unset
    /// falls back to the serde defaults.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("compliance.sensitive_fields")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
