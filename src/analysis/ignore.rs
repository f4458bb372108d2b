use std::collections::HashSet;

/// Expanded module identifiers skipped by every traversal of a policy.
/// Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    modules: HashSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, modules: I) {
        self.modules.extend(modules);
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains(module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
