//! Integration Test: Core Boundaries
//!
//! **Policy**: `carousel/core` is headless. Rendering and network transport
//! live in surfaces; the core only talks to collaborators through traits.
//! Production code never sleeps to wait for work and never panics on
//! `unwrap()`/`expect()`.

use std::fs;

use architectural_enforcement::{dependency_names, find_violations, workspace_root};

/// Crates that belong in a surface, not the core
const SURFACE_ONLY_CRATES: &[&str] = &[
    "reqwest",
    "hyper",
    "ratatui",
    "crossterm",
    "clap",
    "tracing-subscriber",
];

#[test]
fn test_core_has_no_surface_dependencies() {
    let manifest_path = workspace_root().join("carousel/core/Cargo.toml");
    let manifest = fs::read_to_string(&manifest_path).expect("core manifest readable");

    let offending: Vec<String> = dependency_names(&manifest)
        .into_iter()
        .filter(|name| SURFACE_ONLY_CRATES.contains(&name.as_str()))
        .collect();

    assert!(
        offending.is_empty(),
        "carousel-core must stay headless, found surface dependencies: {offending:?}"
    );
}

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = find_violations("carousel/core/src", &["::sleep(", ".sleep(", "thread::sleep"]);
    violations.extend(find_violations("carousel/shell/src", &["::sleep(", ".sleep(", "thread::sleep"]));

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!(
            "Found {} sleep call(s) in production code; wait on channels or deadlines instead",
            violations.len()
        );
    }
}

#[test]
fn test_no_unwrap_in_core_production_code() {
    let violations = find_violations("carousel/core/src", &[".unwrap()", ".expect("]);

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!(
            "Found {} unwrap()/expect() call(s) in carousel-core; propagate errors instead",
            violations.len()
        );
    }
}

#[test]
fn test_core_sources_exist() {
    // Guard against the checks above passing on an empty tree.
    assert!(!architectural_enforcement::rust_files("carousel/core/src").is_empty());
    assert!(!architectural_enforcement::rust_files("carousel/shell/src").is_empty());
}

#[test]
fn test_declared_dependencies_are_used() {
    let mut unused = Vec::new();

    for member in ["carousel/core", "carousel/shell"] {
        let manifest_path = workspace_root().join(member).join("Cargo.toml");
        let manifest = fs::read_to_string(&manifest_path).expect("manifest readable");
        let sources: String = architectural_enforcement::rust_files(&format!("{member}/src"))
            .iter()
            .filter_map(|path| fs::read_to_string(path).ok())
            .collect();

        for name in dependency_names(&manifest) {
            let ident = name.replace('-', "_");
            if !sources.contains(&format!("{ident}::")) {
                unused.push(format!("{member}: {name}"));
            }
        }
    }

    assert!(
        unused.is_empty(),
        "Dependencies declared but never referenced: {unused:?}"
    );
}
