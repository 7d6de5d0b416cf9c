//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The core crate stays headless (no UI or HTTP dependencies)
//! - No sleep() calls in production code
//! - No unwrap()/expect() in production code
//!
//! The helpers below locate workspace sources and strip test code so the
//! checks only see what ships.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this crate
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// All `.rs` files under `dir`, relative to the workspace root
#[must_use]
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// A line of production code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line number (1-based)
    pub number: usize,
    /// Code with any trailing `//` comment removed
    pub code: String,
}

/// Lines of `content` before the first `#[cfg(test)]`, comments stripped
#[must_use]
pub fn production_lines(content: &str) -> Vec<SourceLine> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter_map(|(idx, line)| {
            let code = line.split("//").next().unwrap_or(line).trim();
            (!code.is_empty()).then(|| SourceLine {
                number: idx + 1,
                code: code.to_string(),
            })
        })
        .collect()
}

/// Every production line under `dir` containing any of `needles`
///
/// Returns `"<path>:<line> - <code>"` entries.
#[must_use]
pub fn find_violations(dir: &str, needles: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for path in rust_files(dir) {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for line in production_lines(&content) {
            if needles.iter().any(|n| line.code.contains(n)) {
                violations.push(format!("{}:{} - {}", path.display(), line.number, line.code));
            }
        }
    }
    violations
}

/// Names of the entries in the `[dependencies]` table of a Cargo manifest
#[must_use]
pub fn dependency_names(manifest: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_dependencies = false;

    for line in manifest.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((name, _)) = line.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_tests() {
        let src = "fn a() {}\n// note\nlet x = 1; // trailing\n#[cfg(test)]\nmod tests {}\n";
        let lines = production_lines(src);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].number, 3);
        assert_eq!(lines[1].code, "let x = 1;");
    }

    #[test]
    fn test_dependency_names_only_reads_dependencies() {
        let manifest = "[package]\nname = \"x\"\n\n[dependencies]\n# comment\ntokio = \"1\"\nserde = { version = \"1\" }\n\n[dev-dependencies]\ntempfile = \"3\"\n";
        assert_eq!(dependency_names(manifest), vec!["tokio", "serde"]);
    }
}
