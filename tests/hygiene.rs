//! Source hygiene checks for the timeline engine.
//!
//! Every production file under `src/` is scanned for patterns the engine must
//! not contain. The engine runs inside a browser tab: a panic takes the whole
//! canvas down, and a swallowed error leaves a blank frame with no log line.
//! Budgets only ever go down.

use std::fs;
use std::path::{Path, PathBuf};

struct Rule {
    pattern: &'static str,
    budget: usize,
    hint: &'static str,
}

const RULES: &[Rule] = &[
    Rule { pattern: ".unwrap()", budget: 0, hint: "propagate with `?` or log and fall back" },
    Rule { pattern: ".expect(", budget: 0, hint: "propagate with `?` or log and fall back" },
    Rule { pattern: "panic!(", budget: 0, hint: "return an error instead" },
    Rule { pattern: "unreachable!(", budget: 0, hint: "make the state unrepresentable" },
    Rule { pattern: "todo!(", budget: 0, hint: "finish the stub" },
    Rule { pattern: "unimplemented!(", budget: 0, hint: "finish the stub" },
    Rule { pattern: "let _ =", budget: 0, hint: "inspect the result or log it" },
    Rule { pattern: ".ok()", budget: 0, hint: "match on the error and log it" },
    Rule { pattern: "#[allow(dead_code)]", budget: 0, hint: "delete the dead code" },
    Rule { pattern: "println!(", budget: 0, hint: "use the `log` macros" },
    Rule { pattern: "eprintln!(", budget: 0, hint: "use the `log` macros" },
    Rule { pattern: "dbg!(", budget: 0, hint: "remove debugging output" },
];

/// Production `.rs` files under `src/`, skipping `*_test.rs` siblings.
fn production_files() -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    walk(Path::new(env!("CARGO_MANIFEST_DIR")).join("src").as_path(), &mut out);
    out
}

fn walk(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|ext| ext == "rs");
        let is_test = path.file_name().is_some_and(|name| name.to_string_lossy().ends_with("_test.rs"));
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

fn violations(files: &[(PathBuf, String)], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(move |(n, line)| format!("  {}:{}: {}", path.display(), n + 1, line.trim()))
        })
        .collect()
}

#[test]
fn source_tree_is_not_empty() {
    let files = production_files();
    assert!(files.iter().any(|(path, _)| path.ends_with("lib.rs")), "src/lib.rs not found");
}

#[test]
fn pattern_budgets_hold() {
    let files = production_files();
    let mut report = Vec::new();
    for rule in RULES {
        let hits = violations(&files, rule.pattern);
        if hits.len() > rule.budget {
            report.push(format!(
                "`{}`: found {}, budget {} ({})\n{}",
                rule.pattern,
                hits.len(),
                rule.budget,
                rule.hint,
                hits.join("\n")
            ));
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}

#[test]
fn every_module_has_sibling_tests() {
    let files = production_files();
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let missing: Vec<String> = files
        .iter()
        .filter_map(|(path, content)| {
            let stem = path.file_stem()?.to_string_lossy().into_owned();
            if stem == "lib" || stem == "consts" {
                return None;
            }
            let sibling = format!("{stem}_test.rs");
            let declared = content.contains(&format!("#[path = \"{sibling}\"]"));
            (!declared || !src.join(&sibling).exists()).then_some(stem)
        })
        .collect();
    assert!(missing.is_empty(), "modules without a sibling test file: {missing:?}");
}
