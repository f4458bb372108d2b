//! Integration tests for the archtest library API.

use archtest::{
    ArchtestError, CheckOptions, ModuleGraph, ModuleSpec, Policy, RecordingSink, TestSink, check,
    package,
};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn layered_graph() -> ModuleGraph {
    ModuleGraph::from_specs([
        ModuleSpec::new("app/a").imports(["app/b", "crypto"]),
        ModuleSpec::new("app/b").imports(["app/c"]),
        ModuleSpec::new("app/c"),
        ModuleSpec::new("app/d").imports(["app/c"]),
        ModuleSpec::new("crypto").imports(["crypto/internal"]).runtime(),
        ModuleSpec::new("crypto/internal"),
    ])
}

#[test]
fn test_transitive_dependency_is_reported_with_its_chain() {
    let graph = layered_graph();
    let sink = RecordingSink::new();

    package(&sink, &graph, ["app/a"]).assert_not_dependent_on(["app/c"]);

    assert_eq!(sink.messages(), vec!["Error:\napp/a\n\tapp/b\n\t\tapp/c\n"]);
}

#[test]
fn test_direct_assertion_allows_transitive_dependencies() {
    let graph = layered_graph();
    let sink = RecordingSink::new();

    package(&sink, &graph, ["app/a"]).assert_not_directly_dependent_on(["app/c"]);

    assert!(sink.is_clean(), "unexpected findings: {:?}", sink.messages());
}

#[test]
fn test_runtime_module_is_reported_but_not_traversed() {
    let graph = layered_graph();
    let sink = RecordingSink::new();
    let policy = package(&sink, &graph, ["app/a"]);

    policy.assert_not_dependent_on(["crypto"]);
    assert_eq!(sink.messages(), vec!["Error:\napp/a\n\tcrypto\n"]);

    sink.clear();
    policy.assert_not_dependent_on(["crypto/internal"]);
    assert!(sink.is_clean());
}

#[test]
fn test_wildcard_roots_are_checked_independently() {
    let graph = ModuleGraph::from_specs([
        ModuleSpec::new("pkg/x").imports(["lib/util"]),
        ModuleSpec::new("pkg/y").imports(["lib/bad"]),
        ModuleSpec::new("pkg/z"),
        ModuleSpec::new("lib/util"),
        ModuleSpec::new("lib/bad"),
    ]);
    let sink = RecordingSink::new();

    package(&sink, &graph, ["pkg/..."]).assert_not_dependent_on(["lib/bad"]);

    assert_eq!(sink.messages(), vec!["Error:\npkg/y\n\tlib/bad\n"]);
}

#[test]
fn test_each_root_reports_its_own_violation_through_shared_modules() {
    let graph = ModuleGraph::from_specs([
        ModuleSpec::new("a").imports(["m", "x"]),
        ModuleSpec::new("b").imports(["m"]),
        ModuleSpec::new("m").imports(["y"]),
        ModuleSpec::new("x"),
        ModuleSpec::new("y"),
    ]);
    let sink = RecordingSink::new();

    package(&sink, &graph, ["a", "b"]).assert_not_dependent_on(["x", "y"]);

    assert_eq!(
        sink.messages(),
        vec!["Error:\na\n\tx\n", "Error:\nb\n\tm\n\t\ty\n"]
    );
}

#[test]
fn test_root_reached_by_a_failing_root_is_still_checked() {
    let graph = ModuleGraph::from_specs([
        ModuleSpec::new("a").imports(["b", "x"]),
        ModuleSpec::new("b").imports(["y"]),
        ModuleSpec::new("x"),
        ModuleSpec::new("y"),
    ]);
    let sink = RecordingSink::new();

    package(&sink, &graph, ["a", "b"]).assert_not_dependent_on(["x", "y"]);

    assert_eq!(
        sink.messages(),
        vec!["Error:\na\n\tx\n", "Error:\nb\n\ty\n"]
    );
}

#[test]
fn test_ignored_modules_hide_their_dependencies() {
    let graph = layered_graph();
    let sink = RecordingSink::new();

    package(&sink, &graph, ["app/a"])
        .ignoring(["app/b"])
        .assert_not_dependent_on(["app/c"]);
    assert!(sink.is_clean());

    package(&sink, &graph, ["app/d"])
        .ignoring(["app/c"])
        .assert_not_dependent_on(["app/c"]);
    assert!(sink.is_clean());
}

#[test]
fn test_ignoring_twice_matches_ignoring_once() {
    let graph = layered_graph();
    let sink = RecordingSink::new();

    let once = package(&sink, &graph, ["app/..."]).ignoring(["app/b"]);
    let twice = Policy::new(&sink, &graph, ["app/..."])
        .ignoring(["app/b"])
        .ignoring(["app/b"]);

    assert_eq!(once.ignored(), twice.ignored());
    assert!(sink.is_clean());
}

#[test]
fn test_external_test_imports_render_as_test_package() {
    let graph = ModuleGraph::from_specs([
        ModuleSpec::new("app/a")
            .imports(["app/b"])
            .test_imports(["app/mock"])
            .xtest_imports(["app/e"]),
        ModuleSpec::new("app/b"),
        ModuleSpec::new("app/mock"),
        ModuleSpec::new("app/e"),
    ]);
    let sink = RecordingSink::new();

    package(&sink, &graph, ["app/a"]).assert_not_dependent_on(["app/e", "app/mock"]);
    assert!(sink.is_clean(), "test imports followed without with_tests");

    package(&sink, &graph, ["app/a"])
        .with_tests()
        .assert_not_dependent_on(["app/e"]);
    assert_eq!(sink.messages(), vec!["Error:\napp/a_test\n\tapp/e\n"]);
}

#[test]
fn test_unreadable_module_is_reported() {
    let graph = ModuleGraph::from_specs([ModuleSpec::new("app/a").imports(["app/vanished"])]);
    let sink = RecordingSink::new();

    package(&sink, &graph, ["app/a"]).assert_not_dependent_on(["app/z"]);

    assert_eq!(sink.messages(), vec!["Error reading: app/vanished"]);
}

#[test]
fn test_clean_policy_passes_under_test_sink() {
    let graph = layered_graph();
    let sink = TestSink::new();

    package(&sink, &graph, ["app/c"]).assert_not_dependent_on(["app/a", "app/b"]);
}

#[test]
#[should_panic(expected = "architecture check failed")]
fn test_violation_fails_test_sink() {
    let graph = layered_graph();
    let sink = TestSink::new();

    package(&sink, &graph, ["app/d"]).assert_not_dependent_on(["app/c"]);
}

#[test]
fn test_check_fixture_project() {
    let report = check(&fixture("layered"), CheckOptions::default()).unwrap();

    assert_eq!(report.project_name, "layered");
    let names: Vec<_> = report.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "delivery-skips-persistence",
            "domain-is-pure",
            "domain-tests-are-pure",
            "usecase-skips-sql",
        ]
    );

    assert_eq!(report.violation_count(), 1);
    assert_eq!(report.diagnostic_count(), 0);

    let failing = &report.rules[2];
    assert_eq!(failing.violations[0].root, "shop/domain");
    assert_eq!(failing.violations[0].forbidden, "shop/persistence/memory");
    assert_eq!(
        failing.violations[0].chain,
        "shop/domain_test\n\tshop/persistence/memory\n"
    );
}

#[test]
fn test_check_selected_rules() {
    let options = CheckOptions {
        rules: vec!["domain-is-pure".to_string(), "usecase-skips-sql".to_string()],
    };

    let report = check(&fixture("layered"), options).unwrap();

    assert_eq!(report.rules.len(), 2);
    assert!(report.is_clean());
}

#[test]
fn test_check_unknown_rule() {
    let options = CheckOptions {
        rules: vec!["no-such-rule".to_string()],
    };

    match check(&fixture("layered"), options) {
        Err(ArchtestError::UnknownRule(name)) => assert_eq!(name, "no-such-rule"),
        other => panic!("Expected UnknownRule, got: {:?}", other),
    }
}

#[test]
fn test_check_missing_manifest() {
    let result = check(&fixture("broken"), CheckOptions::default());

    assert!(matches!(result, Err(ArchtestError::Manifest(_))));
}

#[test]
fn test_check_invalid_path() {
    let result = check(Path::new("/nonexistent/path"), CheckOptions::default());

    assert!(matches!(result, Err(ArchtestError::PathNotFound(_))));
}
