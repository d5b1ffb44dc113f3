//! Loading a statement together with its resolved names from a YAML or JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    analysis::{Aliases, TableWithColumns},
    sql_ast::SelectStatement,
};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML input: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported input format '{0}' (expected .yaml, .yml or .json)")]
    UnknownFormat(String),
}

/// Everything the rewriter needs for one SELECT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteInput {
    pub statement: SelectStatement,
    /// One entry per FROM-list element, in order.
    pub tables: Vec<TableWithColumns>,
    #[serde(default)]
    pub aliases: Aliases,
    #[serde(default)]
    pub current_database: Option<String>,
}

impl RewriteInput {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            other => Err(InputError::UnknownFormat(other.to_string())),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, InputError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(content)?)
    }
}
