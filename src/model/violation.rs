use super::node::{ChainLink, DependencyNode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A forbidden module reached from a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub root: String,
    pub forbidden: String,
    pub links: Vec<ChainLink>,
    /// Rendered chain, one tab of indentation per depth level.
    pub chain: String,
}

impl Violation {
    pub fn from_node(node: &DependencyNode) -> Self {
        Self {
            root: node.root_name().to_string(),
            forbidden: node.name().to_string(),
            links: node.links(),
            chain: node.chain(),
        }
    }

    pub fn depth(&self) -> usize {
        self.links.len().saturating_sub(1)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error:\n{}", self.chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_message() {
        let a = DependencyNode::root("app/delivery");
        let b = DependencyNode::child(&a, "app/usecase");
        let c = DependencyNode::child(&b, "app/persistence");

        let violation = Violation::from_node(&c);

        assert_eq!(violation.root, "app/delivery");
        assert_eq!(violation.forbidden, "app/persistence");
        assert_eq!(violation.depth(), 2);
        assert_eq!(
            violation.to_string(),
            "Error:\napp/delivery\n\tapp/usecase\n\t\tapp/persistence\n"
        );
    }
}
