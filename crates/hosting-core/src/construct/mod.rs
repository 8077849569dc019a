//! High-level constructs and their construct tree paths.
//!
//! Each construct owns a [`ConstructNode`] holding its path inside the stack
//! and the low-level resource it renders to (its default child). Logical ids
//! in the template are derived from these paths.

pub mod app;
pub mod branch;
pub mod output;
pub mod role;

use std::fmt;

use crate::domain::digest::short_hash;
use crate::resource::CfnResource;

/// Id of the default child below every construct.
pub const DEFAULT_CHILD_ID: &str = "Resource";

const LOGICAL_ID_HASH_LEN: usize = 8;

/// Path of a construct relative to its stack, e.g. `ProductViewer/main`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructPath(Vec<String>);

impl ConstructPath {
    pub fn root(id: impl Into<String>) -> Self {
        Self(vec![id.into()])
    }

    pub fn child(&self, id: impl Into<String>) -> Self {
        let mut components = self.0.clone();
        components.push(id.into());
        Self(components)
    }

    /// Stable template id for this path.
    ///
    /// A single component is used verbatim (minus non-alphanumerics). Deeper
    /// paths get the alphanumeric concatenation of their components, with
    /// `Resource`/`Default` dropped, followed by an uppercase hash suffix
    /// over the full path so that sibling paths never collide.
    pub fn logical_id(&self) -> String {
        if self.0.len() == 1 {
            return alphanumeric(&self.0[0]);
        }

        let human: String = self
            .0
            .iter()
            .filter(|c| c.as_str() != DEFAULT_CHILD_ID && c.as_str() != "Default")
            .map(|c| alphanumeric(c))
            .collect();
        format!(
            "{}{}",
            human,
            short_hash(&self.to_string(), LOGICAL_ID_HASH_LEN)
        )
    }
}

impl fmt::Display for ConstructPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

fn alphanumeric(component: &str) -> String {
    component.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Tree node of a construct: its path and the resource it renders to.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructNode {
    path: ConstructPath,
    default_child: CfnResource,
}

impl ConstructNode {
    pub fn new(path: ConstructPath, default_child: CfnResource) -> Self {
        Self {
            path,
            default_child,
        }
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    /// Logical id of the default child resource.
    pub fn logical_id(&self) -> String {
        self.path.child(DEFAULT_CHILD_ID).logical_id()
    }

    pub fn default_child(&self) -> &CfnResource {
        &self.default_child
    }

    /// Mutable access to the low-level resource, for properties the owning
    /// construct does not expose. Callers must match the variant they expect.
    pub fn default_child_mut(&mut self) -> &mut CfnResource {
        &mut self.default_child
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = ConstructPath::root("ProductViewer").child("main");
        assert_eq!(path.to_string(), "ProductViewer/main");
    }

    #[test]
    fn test_single_component_logical_id_is_verbatim() {
        assert_eq!(ConstructPath::root("appId").logical_id(), "appId");
        assert_eq!(ConstructPath::root("app-id").logical_id(), "appid");
    }

    #[test]
    fn test_nested_logical_id_drops_resource_and_hashes() {
        let id = ConstructPath::root("ProductViewer")
            .child(DEFAULT_CHILD_ID)
            .logical_id();
        assert!(id.starts_with("ProductViewer"));
        assert_eq!(id.len(), "ProductViewer".len() + 8);
        assert!(!id.contains("Resource"));
    }

    #[test]
    fn test_sibling_logical_ids_differ() {
        let root = ConstructPath::root("ProductViewer");
        let a = root.child("main").child(DEFAULT_CHILD_ID).logical_id();
        let b = root.child("Role").child(DEFAULT_CHILD_ID).logical_id();
        assert_ne!(a, b);
        assert!(a.starts_with("ProductViewermain"));
        assert!(b.starts_with("ProductViewerRole"));
    }

    #[test]
    fn test_logical_id_is_deterministic() {
        let path = ConstructPath::root("ProductViewer").child(DEFAULT_CHILD_ID);
        assert_eq!(path.logical_id(), path.clone().logical_id());
    }
}
