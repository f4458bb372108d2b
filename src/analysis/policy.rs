use super::CheckError;
use super::expand::PatternExpander;
use super::ignore::IgnoreSet;
use super::walker::{Reach, Walker};
use crate::model::Violation;
use crate::resolver::Workspace;
use crate::sink::ErrorSink;

/// Dependency policy for a set of root modules.
///
/// Built by chaining configuration calls, then checked with one or more
/// assertions. Findings go to the sink; an assertion never panics.
///
/// ```
/// use archtest::{ModuleGraph, ModuleSpec, Policy, RecordingSink};
///
/// let graph = ModuleGraph::from_specs([
///     ModuleSpec::new("app/delivery").imports(["app/usecase"]),
///     ModuleSpec::new("app/usecase").imports(["app/persistence"]),
///     ModuleSpec::new("app/persistence"),
/// ]);
/// let sink = RecordingSink::new();
///
/// let policy = Policy::new(&sink, &graph, ["app/delivery"]);
/// policy.assert_not_directly_dependent_on(["app/persistence"]);
/// assert!(sink.is_clean());
///
/// policy.assert_not_dependent_on(["app/persistence"]);
/// assert_eq!(
///     sink.first().unwrap(),
///     "Error:\napp/delivery\n\tapp/usecase\n\t\tapp/persistence\n"
/// );
/// ```
#[derive(Clone)]
pub struct Policy<'a> {
    sink: &'a dyn ErrorSink,
    workspace: &'a dyn Workspace,
    roots: Vec<String>,
    ignored: IgnoreSet,
    include_tests: bool,
}

impl<'a> Policy<'a> {
    /// Roots may be wildcard patterns; they are expanded when checked.
    pub fn new<I, S>(sink: &'a dyn ErrorSink, workspace: &'a dyn Workspace, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sink,
            workspace,
            roots: roots.into_iter().map(Into::into).collect(),
            ignored: IgnoreSet::new(),
            include_tests: false,
        }
    }

    /// Also follow imports made by test code, including external test
    /// packages.
    pub fn with_tests(mut self) -> Self {
        self.include_tests = true;
        self
    }

    /// Skip the given modules (or patterns) in every traversal. Repeated
    /// calls add to the modules already ignored.
    pub fn ignoring<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let expanded = self.expand(&patterns);
        self.ignored.extend(expanded);
        self
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn ignored(&self) -> &IgnoreSet {
        &self.ignored
    }

    pub fn includes_tests(&self) -> bool {
        self.include_tests
    }

    /// Report, for each root, the first chain through which it reaches one
    /// of `forbidden`.
    pub fn assert_not_dependent_on<I, S>(&self, forbidden: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check(forbidden, Reach::Transitive);
    }

    /// Report roots that import one of `forbidden` themselves. Transitive
    /// dependencies are allowed.
    pub fn assert_not_directly_dependent_on<I, S>(&self, forbidden: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check(forbidden, Reach::Direct);
    }

    /// Walk every root and report its first forbidden dependency. Each
    /// violation is reported to the sink and returned.
    pub fn check<I, S>(&self, forbidden: I, reach: Reach) -> Vec<Violation>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let forbidden: Vec<String> = forbidden.into_iter().map(Into::into).collect();
        let forbidden = self.expand(&forbidden);
        let roots = self.expand(&self.roots);

        let mut walk = Walker::new(self.workspace.as_resolver(), self.sink, &self.ignored)
            .with_reach(reach)
            .with_tests(self.include_tests)
            .walk(roots);

        let mut violations = Vec::new();
        while let Some(node) = walk.next() {
            if !node.is_dependency_on(forbidden.as_slice()) {
                continue;
            }
            let violation = Violation::from_node(&node);
            self.sink
                .report_error(&CheckError::Violation(violation.clone()));
            violations.push(violation);
            walk.finish_root();
        }

        tracing::debug!(
            roots = ?self.roots,
            ?reach,
            violations = violations.len(),
            "policy checked"
        );
        violations
    }

    /// Expansion failures are reported and leave nothing to work with.
    fn expand(&self, identifiers: &[String]) -> Vec<String> {
        match PatternExpander::new(self.workspace.as_matcher()).expand(identifiers) {
            Ok(expanded) => expanded,
            Err(err) => {
                self.sink.report_error(&err);
                Vec::new()
            }
        }
    }
}

/// Start a policy for `roots`.
pub fn package<'a, I, S>(
    sink: &'a dyn ErrorSink,
    workspace: &'a dyn Workspace,
    roots: I,
) -> Policy<'a>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Policy::new(sink, workspace, roots)
}
