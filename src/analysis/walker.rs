use super::CheckError;
use super::ignore::IgnoreSet;
use crate::model::DependencyNode;
use crate::resolver::{FOREIGN_MODULE, ModuleResolver};
use crate::sink::ErrorSink;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// How deep a walk goes below each root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reach {
    /// Only the roots and the modules they import themselves.
    Direct,
    #[default]
    Transitive,
}

impl Reach {
    /// Excluded nodes are neither emitted nor expanded.
    pub fn excludes(&self, node: &DependencyNode) -> bool {
        match self {
            Reach::Direct => node.depth() > 1,
            Reach::Transitive => false,
        }
    }
}

/// Walk configuration shared by every root of one traversal.
#[derive(Clone, Copy)]
pub struct Walker<'a> {
    resolver: &'a dyn ModuleResolver,
    sink: &'a dyn ErrorSink,
    ignored: &'a IgnoreSet,
    reach: Reach,
    include_tests: bool,
}

impl<'a> Walker<'a> {
    pub fn new(
        resolver: &'a dyn ModuleResolver,
        sink: &'a dyn ErrorSink,
        ignored: &'a IgnoreSet,
    ) -> Self {
        Self {
            resolver,
            sink,
            ignored,
            reach: Reach::Transitive,
            include_tests: false,
        }
    }

    pub fn with_reach(mut self, reach: Reach) -> Self {
        self.reach = reach;
        self
    }

    pub fn with_tests(mut self, include_tests: bool) -> Self {
        self.include_tests = include_tests;
        self
    }

    /// Breadth-first walk over the import graph of each root in turn.
    pub fn walk<I, S>(self, roots: I) -> Walk<'a>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Walk {
            walker: self,
            roots: roots.into_iter().map(Into::into).collect(),
            queue: VecDeque::new(),
            visited: HashSet::new(),
            current_root: Vec::new(),
            unexpanded: None,
        }
    }
}

/// Lazy breadth-first sequence of [`DependencyNode`]s.
///
/// A node's imports are resolved only when the next node is requested, so a
/// consumer that stops after a match never pays for the rest of the graph.
/// Roots share one visitation set: a module explored under an earlier root
/// is not emitted again. Modules emitted under an abandoned root are
/// forgotten, so later roots still explore them.
pub struct Walk<'a> {
    walker: Walker<'a>,
    roots: VecDeque<String>,
    queue: VecDeque<Arc<DependencyNode>>,
    visited: HashSet<String>,
    /// Modules emitted since the current root started.
    current_root: Vec<String>,
    unexpanded: Option<Arc<DependencyNode>>,
}

impl Walk<'_> {
    /// Abandon the current root: everything still queued under it is
    /// dropped and the walk continues with the next root.
    pub fn finish_root(&mut self) {
        self.queue.clear();
        self.unexpanded = None;
        for name in self.current_root.drain(..) {
            self.visited.remove(&name);
        }
    }

    fn is_skipped(&self, node: &DependencyNode) -> bool {
        let name = node.name();
        self.walker.ignored.contains(name)
            || name == FOREIGN_MODULE
            || self.visited.contains(name)
            || self.walker.reach.excludes(node)
    }

    fn expand(&mut self, node: Arc<DependencyNode>) {
        let imports = match self.walker.resolver.resolve_imports(node.name()) {
            Ok(imports) => imports,
            Err(source) => {
                tracing::debug!(module = node.name(), error = %source, "abandoning subtree");
                self.walker.sink.report_error(&CheckError::ImportRead {
                    module: node.name().to_string(),
                    source,
                });
                return;
            }
        };

        if imports.runtime_internal {
            return;
        }

        for import in imports.direct {
            self.queue.push_back(DependencyNode::child(&node, import));
        }

        if self.walker.include_tests {
            for import in imports.test_only {
                self.queue.push_back(DependencyNode::child(&node, import));
            }

            if !imports.cross_package_test.is_empty() {
                let test_package = node.test_variant();
                for import in imports.cross_package_test {
                    self.queue
                        .push_back(DependencyNode::child(&test_package, import));
                }
            }
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = Arc<DependencyNode>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(node) = self.unexpanded.take() {
            self.expand(node);
        }

        loop {
            let node = match self.queue.pop_front() {
                Some(node) => node,
                None => {
                    self.current_root.clear();
                    DependencyNode::root(self.roots.pop_front()?)
                }
            };

            if self.is_skipped(&node) {
                continue;
            }

            self.visited.insert(node.name().to_string());
            self.current_root.push(node.name().to_string());
            self.unexpanded = Some(Arc::clone(&node));
            return Some(node);
        }
    }
}
