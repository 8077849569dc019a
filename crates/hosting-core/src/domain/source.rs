//! Source-control binding and secret references.

use serde::{Deserialize, Serialize};

use super::error::{HostingError, Result};

/// Reference to a secret in the secrets store.
///
/// Only the secret's name is held. The value is resolved by the
/// provisioning engine through a dynamic reference at apply time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretReference {
    secret_id: String,
}

impl SecretReference {
    pub fn secrets_manager(secret_id: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
        }
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    /// `{{resolve:secretsmanager:<id>:SecretString:::}}`
    pub fn to_dynamic_reference(&self) -> String {
        format!(
            "{{{{resolve:secretsmanager:{}:SecretString:::}}}}",
            self.secret_id
        )
    }
}

/// A GitHub repository bound to the hosted application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceBinding {
    pub owner: String,
    pub repository: String,
    pub oauth_token: SecretReference,
}

impl SourceBinding {
    pub fn github(
        owner: impl Into<String>,
        repository: impl Into<String>,
        oauth_token: SecretReference,
    ) -> Result<Self> {
        let owner = owner.into();
        let repository = repository.into();

        if owner.trim().is_empty() {
            return Err(HostingError::EmptyField { field: "owner" });
        }
        if repository.trim().is_empty() {
            return Err(HostingError::EmptyField {
                field: "repository",
            });
        }
        if oauth_token.secret_id().trim().is_empty() {
            return Err(HostingError::EmptyField {
                field: "github_oauth_token_name",
            });
        }

        Ok(Self {
            owner,
            repository,
            oauth_token,
        })
    }

    pub fn repository_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_reference_format() {
        let secret = SecretReference::secrets_manager("gh-token");
        assert_eq!(
            secret.to_dynamic_reference(),
            "{{resolve:secretsmanager:gh-token:SecretString:::}}"
        );
    }

    #[test]
    fn test_github_binding_url() {
        let binding =
            SourceBinding::github("acme", "site", SecretReference::secrets_manager("gh-token"))
                .expect("binding");
        assert_eq!(binding.repository_url(), "https://github.com/acme/site");
        assert_eq!(binding.oauth_token.secret_id(), "gh-token");
    }

    #[test]
    fn test_github_binding_rejects_empty_owner() {
        let err = SourceBinding::github("", "site", SecretReference::secrets_manager("gh-token"))
            .expect_err("empty owner");
        assert!(matches!(err, HostingError::EmptyField { field: "owner" }));
    }

    #[test]
    fn test_github_binding_rejects_empty_secret() {
        let err = SourceBinding::github("acme", "site", SecretReference::secrets_manager(" "))
            .expect_err("blank secret");
        assert!(matches!(
            err,
            HostingError::EmptyField {
                field: "github_oauth_token_name"
            }
        ));
    }
}
