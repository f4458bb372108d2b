use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Suffix appended to a module's rendered name when it stands for the
/// module's external test package.
pub const TEST_SUFFIX: &str = "_test";

/// One module visited during a traversal.
///
/// Nodes form a tree rooted at each walked root: every node keeps a shared
/// reference to the node that imported it, so the path back to the root can
/// be rendered when a forbidden module is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    name: String,
    parent: Option<Arc<DependencyNode>>,
    test_scoped: bool,
    depth: usize,
}

/// A single entry of a rendered chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub module: String,
    pub test_scoped: bool,
}

impl DependencyNode {
    pub fn root(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: None,
            test_scoped: false,
            depth: 0,
        })
    }

    pub fn child(parent: &Arc<Self>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: Some(Arc::clone(parent)),
            test_scoped: false,
            depth: parent.depth + 1,
        })
    }

    /// Copy of this node tagged as its external test package. Children
    /// imported by that test package hang off the copy, so their chains
    /// render `name_test` instead of `name`.
    pub fn test_variant(self: &Arc<Self>) -> Arc<Self> {
        Arc::new(Self {
            name: self.name.clone(),
            parent: self.parent.clone(),
            test_scoped: true,
            depth: self.depth,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<DependencyNode>> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_test_scoped(&self) -> bool {
        self.test_scoped
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn display_name(&self) -> String {
        if self.test_scoped {
            format!("{}{}", self.name, TEST_SUFFIX)
        } else {
            self.name.clone()
        }
    }

    /// Name of the root this node descends from.
    pub fn root_name(&self) -> &str {
        let mut current = self;
        while let Some(parent) = current.parent.as_deref() {
            current = parent;
        }
        &current.name
    }

    /// Links from the root down to this node.
    pub fn links(&self) -> Vec<ChainLink> {
        let mut links = Vec::with_capacity(self.depth + 1);
        let mut current = Some(self);
        while let Some(node) = current {
            links.push(ChainLink {
                module: node.name.clone(),
                test_scoped: node.test_scoped,
            });
            current = node.parent.as_deref();
        }
        links.reverse();
        links
    }

    /// Render the path from the root to this node, one module per line,
    /// indented with one tab per depth level.
    pub fn chain(&self) -> String {
        let mut chain = match &self.parent {
            Some(parent) => parent.chain(),
            None => String::new(),
        };
        chain.push_str(&"\t".repeat(self.depth));
        chain.push_str(&self.display_name());
        chain.push('\n');
        chain
    }

    /// True when this node is a non-root occurrence of one of `forbidden`.
    /// Roots never count: a wildcard forbidden set may well cover the roots
    /// themselves.
    pub fn is_dependency_on<S: AsRef<str>>(&self, forbidden: &[S]) -> bool {
        if self.is_root() {
            return false;
        }
        forbidden.iter().any(|f| f.as_ref() == self.name)
    }
}
