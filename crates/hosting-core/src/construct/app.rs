//! Hosted application construct.

use std::collections::BTreeMap;

use super::branch::{BranchAttachment, BranchOptions};
use super::role::{ServiceRole, AMPLIFY_SERVICE_PRINCIPAL};
use super::{ConstructNode, ConstructPath};
use crate::domain::{
    BuildSpecDocument, HostingError, Platform, RedirectRule, Result, SourceBinding,
};
use crate::resource::{CfnApp, CfnResource, EnvironmentVariable, Token};

/// Construction inputs for a [`HostedApplication`].
#[derive(Debug, Clone)]
pub struct AppProps {
    pub app_name: String,
    pub source: SourceBinding,
    pub build_spec: BuildSpecDocument,
    pub environment_variables: BTreeMap<String, String>,
    pub custom_rules: Vec<RedirectRule>,
    /// Delete the hosted branch when its source branch is deleted.
    pub auto_branch_deletion: bool,
}

/// The provider-side deployable application.
///
/// The platform tag is deliberately not part of [`AppProps`]: it is only
/// reachable through the default child (see
/// [`crate::stack::apply_platform_override`]).
#[derive(Debug, Clone)]
pub struct HostedApplication {
    node: ConstructNode,
    role: ServiceRole,
    app_name: String,
    source: SourceBinding,
    build_spec: BuildSpecDocument,
    environment_variables: BTreeMap<String, String>,
    custom_rules: Vec<RedirectRule>,
}

impl HostedApplication {
    pub fn new(path: ConstructPath, props: AppProps) -> Result<Self> {
        if props.app_name.trim().is_empty() {
            return Err(HostingError::EmptyField { field: "app_name" });
        }

        let role = ServiceRole::new(path.child("Role"), AMPLIFY_SERVICE_PRINCIPAL);
        let resource = CfnResource::AmplifyApp(CfnApp {
            name: props.app_name.clone(),
            repository: props.source.repository_url(),
            oauth_token: props.source.oauth_token.to_dynamic_reference(),
            build_spec: props.build_spec.to_yaml()?,
            // Filled from `custom_rules` when rendered.
            custom_rules: Vec::new(),
            environment_variables: props
                .environment_variables
                .iter()
                .map(|(name, value)| EnvironmentVariable {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            enable_branch_auto_deletion: props.auto_branch_deletion,
            iam_service_role: role.arn(),
            platform: None,
        });

        let mut app = Self {
            node: ConstructNode::new(path, resource),
            role,
            app_name: props.app_name,
            source: props.source,
            build_spec: props.build_spec,
            environment_variables: props.environment_variables,
            custom_rules: Vec::new(),
        };
        for rule in props.custom_rules {
            app.add_custom_rule(rule);
        }
        Ok(app)
    }

    /// Append a rule. A trailing single-page fallback stays last.
    pub fn add_custom_rule(&mut self, rule: RedirectRule) {
        let fallback = RedirectRule::spa_fallback();
        match self.custom_rules.last() {
            Some(last) if *last == fallback && rule != fallback => {
                let at = self.custom_rules.len() - 1;
                self.custom_rules.insert(at, rule);
            }
            _ => self.custom_rules.push(rule),
        }
    }

    pub fn add_branch(&self, branch_name: &str, options: BranchOptions) -> Result<BranchAttachment> {
        BranchAttachment::new(self, branch_name, options)
    }

    /// Application id, known only once the provisioning engine creates the app.
    pub fn app_id(&self) -> Token {
        Token::get_att(self.node.logical_id(), CfnApp::ATTR_APP_ID)
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn source(&self) -> &SourceBinding {
        &self.source
    }

    pub fn build_spec(&self) -> &BuildSpecDocument {
        &self.build_spec
    }

    pub fn environment_variables(&self) -> &BTreeMap<String, String> {
        &self.environment_variables
    }

    pub fn custom_rules(&self) -> &[RedirectRule] {
        &self.custom_rules
    }

    /// Platform tag currently set on the default child.
    pub fn platform(&self) -> Option<Platform> {
        self.node.default_child().as_app().and_then(|app| app.platform)
    }

    pub fn role(&self) -> &ServiceRole {
        &self.role
    }

    pub fn node(&self) -> &ConstructNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut ConstructNode {
        &mut self.node
    }

    /// Final resource: the default child with the custom rules resolved.
    pub fn render(&self) -> Result<CfnResource> {
        let mut resource = self.node.default_child().clone();
        app_resource_mut(self.node.path(), &mut resource)?.custom_rules = self.custom_rules.clone();
        Ok(resource)
    }
}

/// Narrow `resource` to the application variant, failing on any other kind.
pub fn app_resource_mut<'a>(
    path: &ConstructPath,
    resource: &'a mut CfnResource,
) -> Result<&'a mut CfnApp> {
    let found = resource.type_name();
    resource
        .as_app_mut()
        .ok_or_else(|| HostingError::UnexpectedResourceKind {
            path: path.to_string(),
            expected: CfnApp::TYPE_NAME,
            found,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RedirectStatus, SecretReference};

    fn props() -> AppProps {
        AppProps {
            app_name: "Demo".to_string(),
            source: SourceBinding::github(
                "acme",
                "site",
                SecretReference::secrets_manager("gh-token"),
            )
            .expect("binding"),
            build_spec: BuildSpecDocument::nextjs(),
            environment_variables: BTreeMap::new(),
            custom_rules: Vec::new(),
            auto_branch_deletion: true,
        }
    }

    fn app() -> HostedApplication {
        HostedApplication::new(ConstructPath::root("ProductViewer"), props()).expect("app")
    }

    #[test]
    fn test_default_child_carries_source_and_secret_reference() {
        let app = app();
        let cfn = app.node().default_child().as_app().expect("app resource");
        assert_eq!(cfn.name, "Demo");
        assert_eq!(cfn.repository, "https://github.com/acme/site");
        assert_eq!(
            cfn.oauth_token,
            "{{resolve:secretsmanager:gh-token:SecretString:::}}"
        );
        assert!(cfn.enable_branch_auto_deletion);
        assert_eq!(cfn.iam_service_role, app.role().arn());
        assert!(cfn.platform.is_none());
    }

    #[test]
    fn test_empty_app_name_rejected() {
        let mut props = props();
        props.app_name = String::new();
        let err = HostedApplication::new(ConstructPath::root("ProductViewer"), props)
            .expect_err("empty name");
        assert!(matches!(err, HostingError::EmptyField { field: "app_name" }));
    }

    #[test]
    fn test_catch_all_rule_stays_last() {
        let mut app = app();
        app.add_custom_rule(RedirectRule::spa_fallback());
        app.add_custom_rule(RedirectRule::new(
            "/old",
            "/new",
            RedirectStatus::PermanentRedirect,
        ));

        let rules = app.custom_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].source, "/old");
        assert_eq!(rules[1], RedirectRule::spa_fallback());
    }

    #[test]
    fn test_other_catch_all_goes_before_fallback() {
        let mut app = app();
        app.add_custom_rule(RedirectRule::spa_fallback());
        app.add_custom_rule(RedirectRule::new("/<*>", "/404.html", RedirectStatus::NotFound));

        let rules = app.custom_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].target, "/404.html");
        assert_eq!(rules[1], RedirectRule::spa_fallback());
    }

    #[test]
    fn test_render_resolves_custom_rules() {
        let mut app = app();
        app.add_custom_rule(RedirectRule::spa_fallback());

        let rendered = app.render().expect("render");
        let cfn = rendered.as_app().expect("app resource");
        assert_eq!(cfn.custom_rules, vec![RedirectRule::spa_fallback()]);
        // The stored default child is untouched by rendering.
        assert!(app
            .node()
            .default_child()
            .as_app()
            .expect("app resource")
            .custom_rules
            .is_empty());
    }

    #[test]
    fn test_app_id_references_default_child() {
        let app = app();
        let token = app.app_id();
        let (logical_id, attribute) = token.as_get_att().expect("GetAtt");
        assert_eq!(logical_id, app.node().logical_id());
        assert_eq!(attribute, "AppId");
    }

    #[test]
    fn test_app_resource_mut_rejects_other_kinds() {
        let role = ServiceRole::new(
            ConstructPath::root("ProductViewer").child("Role"),
            AMPLIFY_SERVICE_PRINCIPAL,
        );
        let mut resource = role.node().default_child().clone();
        let err = app_resource_mut(role.node().path(), &mut resource).expect_err("role is not an app");
        assert!(matches!(
            err,
            HostingError::UnexpectedResourceKind {
                found: "AWS::IAM::Role",
                ..
            }
        ));
    }
}
