//! Deploy-time stack configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::error::{HostingError, Result};

/// Inputs supplied at deploy time.
///
/// The OAuth token is never carried here: only the name of the secret that
/// holds it, which the provisioning engine resolves when it applies the stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StackConfiguration {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repository: String,

    /// Name of the secret holding the source-control access token.
    #[serde(alias = "githubOauthTokenName")]
    pub github_oauth_token_name: String,

    /// Environment variables exposed to the build and the running app.
    #[serde(
        default,
        alias = "environmentVariables",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub environment_variables: BTreeMap<String, String>,
}

impl StackConfiguration {
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        github_oauth_token_name: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            github_oauth_token_name: github_oauth_token_name.into(),
            environment_variables: BTreeMap::new(),
        }
    }

    /// Add (or replace) one environment variable.
    pub fn with_environment_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.insert(name.into(), value.into());
        self
    }

    /// Reject empty required fields and unnamed environment variables.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("owner", &self.owner)?;
        require_non_empty("repository", &self.repository)?;
        require_non_empty("github_oauth_token_name", &self.github_oauth_token_name)?;

        for name in self.environment_variables.keys() {
            if name.trim().is_empty() {
                return Err(HostingError::InvalidEnvironmentVariable(
                    "variable name cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Load a configuration file, picking the format from its extension.
    ///
    /// `.json` and `.toml` are supported. The loaded value is not validated;
    /// callers merge overrides first and validate the result.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            other => Err(HostingError::InvalidConfig(format!(
                "unsupported config format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HostingError::EmptyField { field });
    }
    Ok(())
}
