// ABOUTME: Configuration values that can be read from the process environment.
// ABOUTME: Handles literal values and references to environment variables.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    pub fn from_env(var: &str, default: &str) -> Self {
        EnvValue::FromEnv {
            var: var.to_string(),
            default: Some(default.to_string()),
        }
    }

    /// Resolve against the current environment.
    ///
    /// A variable that is set to the empty string resolves to the empty
    /// string; only an unset variable falls back to `default`.
    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) => Ok(val),
                Err(std::env::VarError::NotUnicode(_)) => Err(Error::InvalidConfig(format!(
                    "environment variable {var} is not valid UTF-8"
                ))),
                Err(std::env::VarError::NotPresent) => default
                    .clone()
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }
}

/// YAML form, as written by `init`.
impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Literal(s) => write!(f, "{s:?}"),
            EnvValue::FromEnv { var, default: None } => write!(f, "{{ env: {var} }}"),
            EnvValue::FromEnv {
                var,
                default: Some(default),
            } => write!(f, "{{ env: {var}, default: {default:?} }}"),
        }
    }
}
