//! Redirect and rewrite rules.
//!
//! Rules are evaluated by the hosting platform in declaration order and the
//! first match wins, so order and exact string content are preserved as
//! given.

use serde::{Deserialize, Serialize};

/// Source pattern matching every path.
pub const CATCH_ALL_SOURCE: &str = "/<*>";

/// Root document served for client-side routes.
pub const ROOT_DOCUMENT: &str = "/index.html";

/// How a matched request is answered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RedirectStatus {
    /// Serve the target content under the original URL.
    #[serde(rename = "200")]
    Rewrite,

    #[serde(rename = "301")]
    PermanentRedirect,

    #[serde(rename = "302")]
    TemporaryRedirect,

    #[serde(rename = "404")]
    NotFound,

    /// Serve the target with HTTP 200 when nothing else matched.
    #[serde(rename = "404-200")]
    NotFoundRewrite,
}

impl RedirectStatus {
    pub fn code(&self) -> &'static str {
        match self {
            RedirectStatus::Rewrite => "200",
            RedirectStatus::PermanentRedirect => "301",
            RedirectStatus::TemporaryRedirect => "302",
            RedirectStatus::NotFound => "404",
            RedirectStatus::NotFoundRewrite => "404-200",
        }
    }
}

/// One `{source, target, status}` rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct RedirectRule {
    pub source: String,
    pub target: String,
    pub status: RedirectStatus,
}

impl RedirectRule {
    pub fn new(source: impl Into<String>, target: impl Into<String>, status: RedirectStatus) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            status,
        }
    }

    /// Single-page fallback: every unmatched path serves the root document.
    pub fn spa_fallback() -> Self {
        Self::new(CATCH_ALL_SOURCE, ROOT_DOCUMENT, RedirectStatus::NotFoundRewrite)
    }
}
