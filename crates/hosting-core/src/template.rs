//! Synthesized desired-state template.
//!
//! The template is the only artifact this crate produces: the provisioning
//! engine reads it and creates, updates or deletes the physical resources.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::digest;
use crate::domain::{HostingError, Result};
use crate::resource::{CfnOutput, CfnResource};

/// File name the template is written to for a given stack.
pub fn template_file_name(stack_name: &str) -> String {
    format!("{stack_name}.template.json")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    pub resources: BTreeMap<String, CfnResource>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, CfnOutput>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resource(&mut self, logical_id: String, resource: CfnResource) -> Result<()> {
        if self.resources.contains_key(&logical_id) {
            return Err(HostingError::DuplicateLogicalId(logical_id));
        }
        self.resources.insert(logical_id, resource);
        Ok(())
    }

    pub fn add_output(&mut self, logical_id: String, output: CfnOutput) -> Result<()> {
        if self.outputs.contains_key(&logical_id) {
            return Err(HostingError::DuplicateLogicalId(logical_id));
        }
        self.outputs.insert(logical_id, output);
        Ok(())
    }

    /// Resources of one provider type, e.g. `AWS::Amplify::App`.
    pub fn resources_of_type<'a>(
        &'a self,
        type_name: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a CfnResource)> + 'a {
        self.resources
            .iter()
            .filter(move |(_, resource)| resource.type_name() == type_name)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// SHA-256 of the canonical JSON form; equal for equal desired state.
    pub fn digest(&self) -> Result<String> {
        digest::compute_digest(&serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{CfnRole, PolicyDocument, Token};

    fn role() -> CfnResource {
        CfnResource::IamRole(CfnRole {
            assume_role_policy_document: PolicyDocument::assume_role_by("amplify.amazonaws.com"),
        })
    }

    #[test]
    fn test_duplicate_resource_rejected() {
        let mut template = Template::new();
        template
            .add_resource("Role".to_string(), role())
            .expect("first insert");
        let err = template
            .add_resource("Role".to_string(), role())
            .expect_err("duplicate");
        assert!(matches!(err, HostingError::DuplicateLogicalId(id) if id == "Role"));
    }

    #[test]
    fn test_empty_outputs_omitted() {
        let mut template = Template::new();
        template
            .add_resource("Role".to_string(), role())
            .expect("insert");
        let value = serde_json::to_value(&template).expect("serialize");
        assert!(value.get("Outputs").is_none());
        assert!(value.get("Description").is_none());
        assert_eq!(value["Resources"]["Role"]["Type"], "AWS::IAM::Role");
    }

    #[test]
    fn test_resources_of_type_filters() {
        let mut template = Template::new();
        template
            .add_resource("Role".to_string(), role())
            .expect("insert");
        assert_eq!(template.resources_of_type("AWS::IAM::Role").count(), 1);
        assert_eq!(template.resources_of_type("AWS::Amplify::App").count(), 0);
    }

    #[test]
    fn test_digest_changes_with_outputs() {
        let mut template = Template::new();
        template
            .add_resource("Role".to_string(), role())
            .expect("insert");
        let before = template.digest().expect("digest");
        template
            .add_output(
                "roleArn".to_string(),
                CfnOutput {
                    value: Token::get_att("Role", "Arn"),
                    description: None,
                },
            )
            .expect("output");
        assert_ne!(before, template.digest().expect("digest"));
    }

    #[test]
    fn test_template_file_name() {
        assert_eq!(
            template_file_name("AmplifyHostingStack"),
            "AmplifyHostingStack.template.json"
        );
    }
}
