//! Branch stages and hosting platforms.

use serde::{Deserialize, Serialize};

/// Deployment stage of a branch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Production,
    Beta,
    Development,
    Experimental,
    PullRequest,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Production => "PRODUCTION",
            Stage::Beta => "BETA",
            Stage::Development => "DEVELOPMENT",
            Stage::Experimental => "EXPERIMENTAL",
            Stage::PullRequest => "PULL_REQUEST",
        }
    }
}

/// Hosting platform of an application.
///
/// `WebCompute` is required for server-side rendering on current Next.js
/// releases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Web,
    WebCompute,
    WebDynamic,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Web => "WEB",
            Platform::WebCompute => "WEB_COMPUTE",
            Platform::WebDynamic => "WEB_DYNAMIC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_serializes_uppercase() {
        let json = serde_json::to_string(&Stage::Production).expect("serialize");
        assert_eq!(json, r#""PRODUCTION""#);
        let json = serde_json::to_string(&Stage::PullRequest).expect("serialize");
        assert_eq!(json, r#""PULL_REQUEST""#);
    }

    #[test]
    fn test_platform_serializes_uppercase() {
        let json = serde_json::to_string(&Platform::WebCompute).expect("serialize");
        assert_eq!(json, r#""WEB_COMPUTE""#);
        assert_eq!(Platform::WebDynamic.as_str(), "WEB_DYNAMIC");
    }
}
