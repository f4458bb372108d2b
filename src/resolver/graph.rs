use super::pattern::{is_pattern, pattern_matches};
use super::{ModuleImports, ModuleResolver, PatternMatcher, ResolveError};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    Direct,
    TestOnly,
    CrossPackageTest,
}

#[derive(Debug, Clone)]
struct ModuleEntry {
    name: String,
    /// False for modules that are only known as import targets.
    declared: bool,
    runtime: bool,
}

/// Description of one module, used to populate a [`ModuleGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSpec {
    pub name: String,
    pub imports: Vec<String>,
    pub test_imports: Vec<String>,
    pub xtest_imports: Vec<String>,
    pub runtime: bool,
}

impl ModuleSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    pub fn test_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_imports.extend(imports.into_iter().map(Into::into));
        self
    }

    pub fn xtest_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.xtest_imports.extend(imports.into_iter().map(Into::into));
        self
    }

    pub fn runtime(mut self) -> Self {
        self.runtime = true;
        self
    }
}

/// In-memory import graph of a codebase.
///
/// Nodes are modules, edges are imports weighted by the kind of code that
/// makes them. Edges are kept in declaration order so traversals are
/// reproducible.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    graph: DiGraph<ModuleEntry, ImportKind>,
    node_indices: HashMap<String, NodeIndex>,
    declaration_order: Vec<NodeIndex>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs<I: IntoIterator<Item = ModuleSpec>>(specs: I) -> Self {
        let mut graph = Self::new();
        for spec in specs {
            graph.add_module(spec);
        }
        graph
    }

    /// Declare a module and its imports. Declaring the same module twice
    /// appends to its imports.
    pub fn add_module(&mut self, spec: ModuleSpec) -> &mut Self {
        let from = self.ensure_node(&spec.name);
        if !self.graph[from].declared {
            self.graph[from].declared = true;
            self.declaration_order.push(from);
        }
        self.graph[from].runtime |= spec.runtime;

        let edges = spec
            .imports
            .iter()
            .map(|i| (i, ImportKind::Direct))
            .chain(spec.test_imports.iter().map(|i| (i, ImportKind::TestOnly)))
            .chain(
                spec.xtest_imports
                    .iter()
                    .map(|i| (i, ImportKind::CrossPackageTest)),
            );

        for (import, kind) in edges {
            let to = self.ensure_node(import);
            self.graph.add_edge(from, to, kind);
        }

        self
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.node_indices.get(name) {
            return *idx;
        }
        let idx = self.graph.add_node(ModuleEntry {
            name: name.to_string(),
            declared: false,
            runtime: false,
        });
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    pub fn contains(&self, module: &str) -> bool {
        self.declared_index(module).is_some()
    }

    fn declared_index(&self, module: &str) -> Option<NodeIndex> {
        self.node_indices
            .get(module)
            .copied()
            .filter(|idx| self.graph[*idx].declared)
    }

    /// Declared modules in declaration order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.declaration_order
            .iter()
            .map(|idx| self.graph[*idx].name.as_str())
    }

    pub fn len(&self) -> usize {
        self.declaration_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ModuleResolver for ModuleGraph {
    fn resolve_imports(&self, module: &str) -> Result<ModuleImports, ResolveError> {
        let idx = self
            .declared_index(module)
            .ok_or_else(|| ResolveError::NotFound(module.to_string()))?;

        let mut imports = ModuleImports {
            runtime_internal: self.graph[idx].runtime,
            ..Default::default()
        };

        // petgraph walks a node's edge list newest first
        let mut edges: Vec<_> = self.graph.edges(idx).collect();
        edges.reverse();

        for edge in edges {
            let target = self.graph[edge.target()].name.clone();
            match edge.weight() {
                ImportKind::Direct => imports.direct.push(target),
                ImportKind::TestOnly => imports.test_only.push(target),
                ImportKind::CrossPackageTest => imports.cross_package_test.push(target),
            }
        }

        Ok(imports)
    }
}

impl PatternMatcher for ModuleGraph {
    fn match_patterns(&self, patterns: &[String]) -> Result<Vec<String>, ResolveError> {
        let mut matched = Vec::new();
        let mut seen = HashSet::new();

        for pattern in patterns {
            if !is_pattern(pattern) {
                if seen.insert(pattern.clone()) {
                    matched.push(pattern.clone());
                }
                continue;
            }
            for module in self.modules() {
                if pattern_matches(pattern, module) && seen.insert(module.to_string()) {
                    matched.push(module.to_string());
                }
            }
        }

        Ok(matched)
    }
}
