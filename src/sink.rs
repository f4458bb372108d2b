//! Where policy checks send their findings.
//!
//! A check never panics or returns an error for a finding. Violations and
//! resolution problems are reported to an [`ErrorSink`], and the sink
//! decides what a failure means: [`RecordingSink`] keeps the messages for
//! inspection, [`TestSink`] fails the enclosing Rust test once it goes out
//! of scope.

use crate::analysis::CheckError;
use std::sync::Mutex;

pub trait ErrorSink: Send + Sync {
    fn report(&self, message: &str);

    /// Report a structured finding. The default forwards its message.
    fn report_error(&self, error: &CheckError) {
        self.report(&error.to_string());
    }
}

/// Records every reported message in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn first(&self) -> Option<String> {
        self.lock().first().cloned()
    }

    pub fn is_clean(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // a poisoned sink still holds every message reported before the panic
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ErrorSink for RecordingSink {
    fn report(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}

/// Sink bound to the Rust test harness: collects findings and panics with
/// all of them when dropped, failing the test that owns it.
///
/// ```should_panic
/// use archtest::{ModuleGraph, ModuleSpec, TestSink, package};
///
/// let graph = ModuleGraph::from_specs([
///     ModuleSpec::new("app/delivery").imports(["app/persistence"]),
///     ModuleSpec::new("app/persistence"),
/// ]);
/// let sink = TestSink::new();
/// package(&sink, &graph, ["app/delivery"]).assert_not_dependent_on(["app/persistence"]);
/// ```
#[derive(Debug, Default)]
pub struct TestSink {
    recorded: RecordingSink,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.recorded.messages()
    }

    pub fn is_clean(&self) -> bool {
        self.recorded.is_clean()
    }
}

impl ErrorSink for TestSink {
    fn report(&self, message: &str) {
        self.recorded.report(message);
    }
}

impl Drop for TestSink {
    fn drop(&mut self) {
        if std::thread::panicking() || self.recorded.is_clean() {
            return;
        }
        panic!(
            "architecture check failed:\n{}",
            self.recorded.messages().join("\n")
        );
    }
}
