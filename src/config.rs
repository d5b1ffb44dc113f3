use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unknown cross_to_inner_join_rewrite level {0} (expected 0, 1 or 2)")]
    UnknownRewriteLevel(u8),
}

/// How hard the rewriter tries to turn CROSS/comma joins into INNER joins.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CrossToInnerJoinRewrite {
    /// Leave joins alone (comma joins are still read as CROSS).
    Disabled = 0,
    /// Rewrite what can be proven; keep the rest as slow cross joins.
    #[default]
    BestEffort = 1,
    /// A comma join that cannot be rewritten rejects the query.
    Mandatory = 2,
}

impl CrossToInnerJoinRewrite {
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn is_enabled(self) -> bool {
        self != CrossToInnerJoinRewrite::Disabled
    }
}

impl TryFrom<u8> for CrossToInnerJoinRewrite {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CrossToInnerJoinRewrite::Disabled),
            1 => Ok(CrossToInnerJoinRewrite::BestEffort),
            2 => Ok(CrossToInnerJoinRewrite::Mandatory),
            other => Err(ConfigError::UnknownRewriteLevel(other)),
        }
    }
}

impl From<CrossToInnerJoinRewrite> for u8 {
    fn from(value: CrossToInnerJoinRewrite) -> Self {
        value.level()
    }
}

/// Rewriter settings with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RewriteConfig {
    /// 0 = disabled, 1 = best effort, 2 = mandatory for comma joins
    #[validate(range(max = 2, message = "cross_to_inner_join_rewrite must be 0, 1 or 2"))]
    pub cross_to_inner_join_rewrite: u8,

    /// Database assumed for unqualified table names
    #[validate(length(min = 1, message = "Current database cannot be empty"))]
    pub current_database: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            cross_to_inner_join_rewrite: CrossToInnerJoinRewrite::default().level(),
            current_database: "default".to_string(),
        }
    }
}

impl RewriteConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            cross_to_inner_join_rewrite: parse_env_var("CROSS_TO_INNER_JOIN_REWRITE", "1")?,
            current_database: env::var("CURRENT_DATABASE")
                .unwrap_or_else(|_| "default".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge(cli);
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides; unset options keep the current value
    pub fn merge(&mut self, cli: CliConfig) {
        if let Some(level) = cli.cross_to_inner_join_rewrite {
            self.cross_to_inner_join_rewrite = level;
        }
        if let Some(database) = cli.current_database {
            self.current_database = database;
        }
    }

    pub fn policy(&self) -> Result<CrossToInnerJoinRewrite, ConfigError> {
        CrossToInnerJoinRewrite::try_from(self.cross_to_inner_join_rewrite)
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub cross_to_inner_join_rewrite: Option<u8>,
    pub current_database: Option<String>,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
