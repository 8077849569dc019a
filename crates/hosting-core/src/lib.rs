//! Hosting Core Library
//!
//! Declares an Amplify Hosting deployment for a server-rendered Next.js app
//! and synthesizes it into a desired-state template for the provisioning
//! engine. Nothing here talks to the network: credentials, repository
//! access and builds are all resolved by external systems at apply time.

pub mod construct;
pub mod domain;
pub mod obs;
pub mod resource;
pub mod stack;
pub mod telemetry;
pub mod template;

pub use construct::app::{AppProps, HostedApplication};
pub use construct::branch::{BranchAttachment, BranchOptions};
pub use construct::output::StackOutput;
pub use construct::role::ServiceRole;
pub use construct::{ConstructNode, ConstructPath};

pub use domain::{
    BuildPhase, BuildSpecDocument, BuiltinStep, HostingError, PhaseKind, Platform, RedirectRule,
    RedirectStatus, Result, SecretReference, SourceBinding, Stage, StackConfiguration,
};

pub use resource::{CfnApp, CfnBranch, CfnOutput, CfnResource, CfnRole, Token};

pub use stack::{
    apply_platform_override, attach_branch, attach_redirect_rules, construct, publish_output,
    HostingStack, APP_ID_OUTPUT, APP_NAME, DEFAULT_STACK_NAME, PRODUCTION_BRANCH,
};
pub use telemetry::init_tracing;
pub use template::{template_file_name, Template};

/// Hosting stack version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
