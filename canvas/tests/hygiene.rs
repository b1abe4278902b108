//! Hygiene: enforces coding standards at test time
//!
//! Scans the canvas crate's production sources for patterns that crash the
//! host page or swallow errors. Each pattern has a budget (ideally zero). If
//! you must add one, fix an existing one first: the budget never grows.

use std::fs;
use std::path::Path;

/// `(pattern, budget, why)` for every scanned antipattern.
const BUDGETS: &[(&str, usize, &str)] = &[
    // Panics abort the wasm instance.
    (".unwrap()", 0, "propagate or handle the None/Err case"),
    (".expect(", 0, "propagate or handle the None/Err case"),
    ("panic!(", 0, "degrade instead of crashing the page"),
    ("unreachable!(", 0, "make the state unrepresentable instead"),
    ("todo!(", 0, "finish the stub"),
    ("unimplemented!(", 0, "finish the stub"),
    // Silent loss.
    ("let _ =", 0, "inspect the result"),
    (".ok()", 0, "inspect the error"),
    // Structure.
    ("#[allow(dead_code)]", 0, "delete the dead code"),
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `canvas/src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn scans_some_sources() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("engine.rs")), "run from the canvas crate root");
}

#[test]
fn antipattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for (pattern, budget, why) in BUDGETS {
        let found = hits(&files, pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > *budget {
            let detail = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect::<Vec<_>>().join("\n");
            failures.push(format!("  `{pattern}` found {count}, max {budget} ({why})\n{detail}"));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}

#[test]
fn every_logic_module_has_tests() {
    let files = source_files();
    let untested: Vec<&str> = files
        .iter()
        .filter(|f| f.content.contains("pub fn ") && !f.content.contains("#[cfg(test)]"))
        .map(|f| f.path.as_str())
        .collect();
    assert!(untested.is_empty(), "modules without a test module: {untested:?}");
}
