//! Hygiene: source-level rules for the drawcore library.
//!
//! The editor core is embedded in a host's event loop, so library code must
//! never take the process down or print. Each pattern below has a budget; a
//! budget only ever shrinks.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const LIBRARY_BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "propagate with `?` or log and fall back" },
    Budget { pattern: ".expect(", max: 0, why: "propagate with `?` or log and fall back" },
    Budget { pattern: "panic!(", max: 0, why: "return an error variant instead" },
    Budget { pattern: "unreachable!(", max: 0, why: "match exhaustively instead" },
    Budget { pattern: "todo!(", max: 0, why: "every operation is implemented" },
    Budget { pattern: "let _ =", max: 0, why: "store failures are logged, never dropped" },
    Budget { pattern: ".ok()", max: 0, why: "store failures are logged, never dropped" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete unused code" },
    Budget { pattern: "println!(", max: 0, why: "the host owns stdout; use tracing" },
    Budget { pattern: "process::exit", max: 0, why: "only the demo binary exits" },
];

/// The demo binary may print its render list once and exit on failure.
const BINARY_BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "log the error and exit" },
    Budget { pattern: "println!(", max: 1, why: "stdout carries only the render list" },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding `_test.rs` siblings.
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
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn is_binary(file: &SourceFile) -> bool {
    file.path.ends_with("main.rs")
}

/// Lines matching each budget's pattern, as `path: count` per file.
fn violations<'a>(files: impl Iterator<Item = &'a SourceFile> + Clone, budgets: &[Budget]) -> Vec<String> {
    budgets
        .iter()
        .filter_map(|budget| {
            let hits: Vec<(String, usize)> = files
                .clone()
                .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(budget.pattern)).count()))
                .filter(|(_, count)| *count > 0)
                .collect();
            let count: usize = hits.iter().map(|(_, c)| c).sum();
            if count <= budget.max {
                return None;
            }
            let detail: Vec<String> = hits.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            Some(format!(
                "`{}` found {count}, max {} ({})\n{}",
                budget.pattern,
                budget.max,
                budget.why,
                detail.join("\n")
            ))
        })
        .collect()
}

#[test]
fn library_budgets() {
    let files = source_files();
    let over = violations(files.iter().filter(|f| !is_binary(f)), LIBRARY_BUDGETS);
    assert!(over.is_empty(), "library hygiene budgets exceeded:\n{}", over.join("\n"));
}

#[test]
fn binary_budgets() {
    let files = source_files();
    let over = violations(files.iter().filter(|f| is_binary(f)), BINARY_BUDGETS);
    assert!(over.is_empty(), "binary hygiene budgets exceeded:\n{}", over.join("\n"));
}

#[test]
fn library_sources_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("editor.rs")), "run from the crate root");
}

#[test]
fn every_module_has_sibling_tests() {
    let files = source_files();
    let missing: Vec<&str> = files
        .iter()
        .map(|f| f.path.as_str())
        .filter(|path| !path.ends_with("lib.rs") && !path.ends_with("main.rs") && !path.ends_with("consts.rs"))
        .filter(|path| {
            let sibling = if path.ends_with("mod.rs") {
                path.replace("mod.rs", "registry_test.rs")
            } else {
                path.replace(".rs", "_test.rs")
            };
            !Path::new(&sibling).exists()
        })
        .collect();
    assert!(missing.is_empty(), "modules without a sibling _test.rs:\n  {}", missing.join("\n  "));
}
