//! Service role assumed by the hosting platform.

use super::{ConstructNode, ConstructPath};
use crate::resource::{CfnResource, CfnRole, PolicyDocument, Token};

/// Service principal of Amplify Hosting.
pub const AMPLIFY_SERVICE_PRINCIPAL: &str = "amplify.amazonaws.com";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRole {
    node: ConstructNode,
}

impl ServiceRole {
    pub fn new(path: ConstructPath, service_principal: &str) -> Self {
        let resource = CfnResource::IamRole(CfnRole {
            assume_role_policy_document: PolicyDocument::assume_role_by(service_principal),
        });
        Self {
            node: ConstructNode::new(path, resource),
        }
    }

    pub fn arn(&self) -> Token {
        Token::get_att(self.node.logical_id(), CfnRole::ATTR_ARN)
    }

    pub fn node(&self) -> &ConstructNode {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_arn_references_own_logical_id() {
        let role = ServiceRole::new(
            ConstructPath::root("ProductViewer").child("Role"),
            AMPLIFY_SERVICE_PRINCIPAL,
        );
        let arn = role.arn();
        let (logical_id, attribute) = arn.as_get_att().expect("GetAtt");
        assert_eq!(logical_id, role.node().logical_id());
        assert_eq!(attribute, "Arn");
        assert_eq!(role.node().default_child().type_name(), "AWS::IAM::Role");
    }
}
