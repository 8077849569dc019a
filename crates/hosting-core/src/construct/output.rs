//! Stack outputs.

use super::ConstructPath;
use crate::resource::{CfnOutput, Token};

/// A named value published by the stack for downstream tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutput {
    id: String,
    value: Token,
    description: Option<String>,
}

impl StackOutput {
    pub fn new(id: impl Into<String>, value: Token) -> Self {
        Self {
            id: id.into(),
            value,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn logical_id(&self) -> String {
        ConstructPath::root(self.id.clone()).logical_id()
    }

    pub fn value(&self) -> &Token {
        &self.value
    }

    pub fn render(&self) -> CfnOutput {
        CfnOutput {
            value: self.value.clone(),
            description: self.description.clone(),
        }
    }
}
