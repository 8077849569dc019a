//! Low-level resource model.
//!
//! These types mirror the provider's resource schema one-to-one and
//! serialize straight into template entries. Higher-level constructs own one
//! of them as their default child.

use serde::{Deserialize, Serialize};

use crate::domain::{Platform, RedirectRule, Stage};

/// A property value: either a literal or a reference to another resource's
/// attribute that the provisioning engine resolves at apply time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Token {
    Literal(String),
    GetAtt(GetAtt),
}

/// `{"Fn::GetAtt": [logical_id, attribute]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetAtt {
    #[serde(rename = "Fn::GetAtt")]
    pub target: (String, String),
}

impl Token {
    pub fn literal(value: impl Into<String>) -> Self {
        Token::Literal(value.into())
    }

    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Token::GetAtt(GetAtt {
            target: (logical_id.into(), attribute.into()),
        })
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Token::Literal(value) => Some(value.as_str()),
            Token::GetAtt(_) => None,
        }
    }

    /// `(logical_id, attribute)` for attribute references.
    pub fn as_get_att(&self) -> Option<(&str, &str)> {
        match self {
            Token::GetAtt(GetAtt { target }) => Some((target.0.as_str(), target.1.as_str())),
            Token::Literal(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

/// `AWS::Amplify::App`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CfnApp {
    pub name: String,
    pub repository: String,
    pub oauth_token: String,
    pub build_spec: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_rules: Vec<RedirectRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment_variables: Vec<EnvironmentVariable>,
    pub enable_branch_auto_deletion: bool,
    #[serde(rename = "IAMServiceRole")]
    pub iam_service_role: Token,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
}

impl CfnApp {
    pub const TYPE_NAME: &'static str = "AWS::Amplify::App";
    pub const ATTR_APP_ID: &'static str = "AppId";
}

/// `AWS::Amplify::Branch`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CfnBranch {
    pub app_id: Token,
    pub branch_name: String,
    pub enable_auto_build: bool,
    pub enable_pull_request_preview: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

impl CfnBranch {
    pub const TYPE_NAME: &'static str = "AWS::Amplify::Branch";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServicePrincipal {
    #[serde(rename = "Service")]
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: String,
    pub effect: String,
    pub principal: ServicePrincipal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub statement: Vec<PolicyStatement>,
    pub version: String,
}

impl PolicyDocument {
    /// Trust policy letting `service` assume the role.
    pub fn assume_role_by(service: impl Into<String>) -> Self {
        Self {
            statement: vec![PolicyStatement {
                action: "sts:AssumeRole".to_string(),
                effect: "Allow".to_string(),
                principal: ServicePrincipal {
                    service: service.into(),
                },
            }],
            version: "2012-10-17".to_string(),
        }
    }
}

/// `AWS::IAM::Role`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CfnRole {
    pub assume_role_policy_document: PolicyDocument,
}

impl CfnRole {
    pub const TYPE_NAME: &'static str = "AWS::IAM::Role";
    pub const ATTR_ARN: &'static str = "Arn";
}

/// Any resource the stack can emit, tagged by its provider type name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "Type", content = "Properties")]
pub enum CfnResource {
    #[serde(rename = "AWS::Amplify::App")]
    AmplifyApp(CfnApp),

    #[serde(rename = "AWS::Amplify::Branch")]
    AmplifyBranch(CfnBranch),

    #[serde(rename = "AWS::IAM::Role")]
    IamRole(CfnRole),
}

impl CfnResource {
    pub fn type_name(&self) -> &'static str {
        match self {
            CfnResource::AmplifyApp(_) => CfnApp::TYPE_NAME,
            CfnResource::AmplifyBranch(_) => CfnBranch::TYPE_NAME,
            CfnResource::IamRole(_) => CfnRole::TYPE_NAME,
        }
    }

    pub fn as_app(&self) -> Option<&CfnApp> {
        match self {
            CfnResource::AmplifyApp(app) => Some(app),
            _ => None,
        }
    }

    pub fn as_app_mut(&mut self) -> Option<&mut CfnApp> {
        match self {
            CfnResource::AmplifyApp(app) => Some(app),
            _ => None,
        }
    }

    pub fn as_branch(&self) -> Option<&CfnBranch> {
        match self {
            CfnResource::AmplifyBranch(branch) => Some(branch),
            _ => None,
        }
    }
}

/// Template output entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CfnOutput {
    pub value: Token,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
