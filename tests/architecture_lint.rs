//! Architecture enforcement tests.
//!
//! Two layering rules are checked against the source tree:
//!
//! 1. **Single doorway** - only `src/git/` may use the `git2` crate
//! 2. **Thin handlers** - command handlers never move refs or check out
//!    trees themselves; every mutation goes through the engine's
//!    classify-then-apply pipeline

use std::fs;
use std::path::{Path, PathBuf};

/// Repository mutations that only the engine may request.
const MUTATING_CALLS: &[&str] = &["update_ref_cas(", "checkout_tree_safe("];

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read source directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            files.push(path);
        }
    }
    files
}

#[test]
fn only_git_module_uses_git2() {
    let git_dir = Path::new("src/git");
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src")) {
        if path.starts_with(git_dir) {
            continue;
        }
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
        if content.contains("git2::") || content.contains("use git2") {
            violations.push(path.display().to_string());
        }
    }

    assert!(
        violations.is_empty(),
        "git2 used outside src/git:\n  {}",
        violations.join("\n  ")
    );
}

#[test]
fn command_handlers_do_not_mutate_directly() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src/cli")) {
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
        for call in MUTATING_CALLS {
            if content.contains(call) {
                violations.push(format!("{}: calls {}", path.display(), call));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "handlers must go through the engine:\n  {}",
        violations.join("\n  ")
    );
}

#[test]
fn every_command_module_is_declared() {
    let command_dir = Path::new("src/cli/commands");
    let module_file = fs::read_to_string(command_dir.join("mod.rs"))
        .expect("Failed to read commands/mod.rs");

    for path in rust_files(command_dir) {
        let stem = path.file_stem().unwrap().to_str().unwrap();
        if stem == "mod" {
            continue;
        }
        assert!(
            module_file.contains(&format!("mod {};", stem)),
            "{} is not declared in commands/mod.rs",
            path.display()
        );
    }
}
