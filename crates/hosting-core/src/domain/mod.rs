//! Domain models for the hosting stack.
//!
//! - `StackConfiguration`: deploy-time inputs
//! - `BuildSpecDocument`: build phases, artifacts and cache
//! - `SourceBinding`: repository plus secret reference
//! - `RedirectRule`: ordered routing rules
//! - `Stage` / `Platform`: branch and application classifications

pub mod buildspec;
pub mod config;
pub mod digest;
pub mod error;
pub mod redirect;
pub mod source;
pub mod stage;

pub use buildspec::{
    ArtifactRule, BuildPhase, BuildPhases, BuildSpecDocument, BuiltinStep, CacheRule, PhaseKind,
};
pub use config::StackConfiguration;
pub use error::{HostingError, Result};
pub use redirect::{RedirectRule, RedirectStatus, CATCH_ALL_SOURCE, ROOT_DOCUMENT};
pub use source::{SecretReference, SourceBinding};
pub use stage::{Platform, Stage};
