//! Branch attachment construct.

use super::app::HostedApplication;
use super::ConstructNode;
use crate::domain::{HostingError, Result, Stage};
use crate::resource::{CfnBranch, CfnResource, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOptions {
    pub stage: Option<Stage>,
    /// Build on every push to the branch.
    pub auto_build: bool,
    /// Deploy a preview for each pull request against the branch.
    pub pull_request_preview: bool,
}

impl Default for BranchOptions {
    fn default() -> Self {
        Self {
            stage: None,
            auto_build: true,
            pull_request_preview: true,
        }
    }
}

impl BranchOptions {
    pub fn with_stage(stage: Stage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }
}

/// One deployable branch of a hosted application.
///
/// The branch name is not checked against the repository; a missing branch
/// only shows up as a failed build on the provider side.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchAttachment {
    node: ConstructNode,
    branch_name: String,
    stage: Option<Stage>,
    app_id: Token,
}

impl BranchAttachment {
    pub(crate) fn new(
        app: &HostedApplication,
        branch_name: &str,
        options: BranchOptions,
    ) -> Result<Self> {
        if branch_name.trim().is_empty() {
            return Err(HostingError::EmptyField {
                field: "branch_name",
            });
        }

        let app_id = app.app_id();
        let resource = CfnResource::AmplifyBranch(CfnBranch {
            app_id: app_id.clone(),
            branch_name: branch_name.to_string(),
            enable_auto_build: options.auto_build,
            enable_pull_request_preview: options.pull_request_preview,
            stage: options.stage,
        });

        Ok(Self {
            node: ConstructNode::new(app.node().path().child(branch_name), resource),
            branch_name: branch_name.to_string(),
            stage: options.stage,
            app_id,
        })
    }

    pub fn branch_name(&self) -> &str {
        &self.branch_name
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Id of the application this branch belongs to.
    pub fn app_id(&self) -> &Token {
        &self.app_id
    }

    pub fn node(&self) -> &ConstructNode {
        &self.node
    }

    pub fn render(&self) -> CfnResource {
        self.node.default_child().clone()
    }
}
