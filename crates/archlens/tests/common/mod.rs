//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use archlens::domain::{DependencyBatch, EdgeDescriptor};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// The demo repository: a three-file import cycle.
pub fn demo_batch() -> DependencyBatch {
    batch("demo", "run-1", &[("a", "b"), ("b", "c"), ("c", "a")])
}

/// Build an import batch from (source, target) pairs.
pub fn batch(repo: &str, analysis: &str, edges: &[(&str, &str)]) -> DependencyBatch {
    DependencyBatch::new(
        repo,
        analysis,
        edges
            .iter()
            .map(|&(source, target)| EdgeDescriptor::new(source, target, "import"))
            .collect(),
    )
}

/// A chain `f0 -> f1 -> ... -> f{len}`.
pub fn chain(repo: &str, len: usize) -> DependencyBatch {
    let names: Vec<String> = (0..=len).map(|i| format!("f{i}")).collect();
    let edges: Vec<(&str, &str)> = names
        .windows(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        .collect();
    batch(repo, "run-1", &edges)
}

/// Write a batch as JSON into `dir`, returning its path.
pub fn write_batch(dir: &Path, name: &str, batch: &DependencyBatch) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(batch).expect("Failed to serialize batch");
    std::fs::write(&path, json).expect("Failed to write batch file");
    path
}

/// Run the archlens binary in the specified directory.
pub fn run_archlens_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_archlens"))
        .args(args)
        .current_dir(dir)
        .env_remove("ARCHLENS_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute archlens binary")
}
