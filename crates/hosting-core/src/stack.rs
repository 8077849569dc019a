//! Stack assembly.
//!
//! [`HostingStack::new`] runs the whole single-pass build: construct the
//! application, attach the fallback rule, attach the production branch,
//! override the platform and publish the application id. Each step is also
//! available on its own.

use crate::construct::app::{app_resource_mut, AppProps, HostedApplication};
use crate::construct::branch::{BranchAttachment, BranchOptions};
use crate::construct::output::StackOutput;
use crate::construct::ConstructPath;
use crate::domain::{
    BuildSpecDocument, HostingError, Platform, RedirectRule, Result, SecretReference,
    SourceBinding, Stage, StackConfiguration,
};
use crate::obs;
use crate::template::Template;

pub const DEFAULT_STACK_NAME: &str = "AmplifyHostingStack";

/// Construct id of the application inside the stack.
pub const APP_CONSTRUCT_ID: &str = "ProductViewer";

/// Display name of the hosted application.
pub const APP_NAME: &str = "Kitchen Sink Product Example";

pub const PRODUCTION_BRANCH: &str = "main";

/// Output carrying the application id.
pub const APP_ID_OUTPUT: &str = "appId";

/// Build the application from `config`: source binding, Next.js build
/// specification and environment variables. Rules and branches come after.
pub fn construct(config: &StackConfiguration) -> Result<HostedApplication> {
    config.validate()?;

    let source = SourceBinding::github(
        config.owner.clone(),
        config.repository.clone(),
        SecretReference::secrets_manager(config.github_oauth_token_name.clone()),
    )?;

    let app = HostedApplication::new(
        ConstructPath::root(APP_CONSTRUCT_ID),
        AppProps {
            app_name: APP_NAME.to_string(),
            source,
            build_spec: BuildSpecDocument::nextjs(),
            environment_variables: config.environment_variables.clone(),
            custom_rules: Vec::new(),
            auto_branch_deletion: true,
        },
    )?;

    obs::emit_stack_constructed(
        app.app_name(),
        &app.source().repository_url(),
        app.environment_variables().len(),
    );
    Ok(app)
}

/// Route every unmatched path to the root document with HTTP 200.
///
/// Attached even when other `/<*>` rules exist. Adding it again is a no-op;
/// the rule stays last as other rules are added.
pub fn attach_redirect_rules(app: &mut HostedApplication) {
    let rule = RedirectRule::spa_fallback();
    if app.custom_rules().contains(&rule) {
        return;
    }
    obs::emit_rule_attached(&rule.source, &rule.target, rule.status);
    app.add_custom_rule(rule);
}

pub fn attach_branch(
    app: &HostedApplication,
    branch_name: &str,
    stage: Stage,
) -> Result<BranchAttachment> {
    let branch = app.add_branch(branch_name, BranchOptions::with_stage(stage))?;
    obs::emit_branch_attached(branch.branch_name(), stage);
    Ok(branch)
}

/// Set the platform tag on the application's low-level resource.
///
/// The high-level construct has no platform setting, so this reaches its
/// default child directly. The child must be the application variant;
/// anything else is an error rather than a blind write. Setting the same
/// field again overwrites it.
pub fn apply_platform_override(app: &mut HostedApplication, platform: Platform) -> Result<()> {
    let path = app.node().path().clone();
    let cfn = app_resource_mut(&path, app.node_mut().default_child_mut())?;
    cfn.platform = Some(platform);
    obs::emit_override_applied(&path.to_string(), platform);
    Ok(())
}

/// Publish the application id, unchanged, as the `appId` output.
pub fn publish_output(app: &HostedApplication) -> StackOutput {
    let output = StackOutput::new(APP_ID_OUTPUT, app.app_id());
    obs::emit_output_published(output.id());
    output
}

/// The assembled desired state: one application, one branch, one output.
#[derive(Debug, Clone)]
pub struct HostingStack {
    name: String,
    app: HostedApplication,
    branch: BranchAttachment,
    output: StackOutput,
}

impl HostingStack {
    /// Assemble the stack. Fails before producing anything if `config` has
    /// an empty required field.
    pub fn new(name: impl Into<String>, config: &StackConfiguration) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HostingError::EmptyField {
                field: "stack_name",
            });
        }
        let _span = obs::StackSpan::enter(&name);

        let mut app = construct(config)?;
        attach_redirect_rules(&mut app);
        let branch = attach_branch(&app, PRODUCTION_BRANCH, Stage::Production)?;
        apply_platform_override(&mut app, Platform::WebCompute)?;
        let output = publish_output(&app);

        Ok(Self {
            name,
            app,
            branch,
            output,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn app(&self) -> &HostedApplication {
        &self.app
    }

    pub fn branch(&self) -> &BranchAttachment {
        &self.branch
    }

    pub fn output(&self) -> &StackOutput {
        &self.output
    }

    /// Render the desired-state template.
    pub fn synth(&self) -> Result<Template> {
        let _span = obs::StackSpan::enter(&self.name);

        let mut template = Template::new();
        let role = self.app.role().node();
        template.add_resource(role.logical_id(), role.default_child().clone())?;
        template.add_resource(self.app.node().logical_id(), self.app.render()?)?;
        template.add_resource(self.branch.node().logical_id(), self.branch.render())?;
        template.add_output(self.output.logical_id(), self.output.render())?;

        let digest = template.digest()?;
        obs::emit_stack_synthesized(
            &self.name,
            template.resources.len(),
            template.outputs.len(),
            &digest,
        );
        Ok(template)
    }
}
