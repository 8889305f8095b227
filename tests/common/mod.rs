//! Common test utilities
//!
//! Provides an isolated temp directory for materials files and generated
//! shader output, plus helpers for reading the generated files back.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment with isolated input and output directories
pub struct TestEnvironment {
    /// Temporary directory owning everything below
    pub temp_dir: TempDir,
    /// Directory generated shaders are written to
    pub out_dir: PathBuf,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let out_dir = temp_dir.path().join("out");

        Self { temp_dir, out_dir }
    }

    /// Write a materials file and return its path
    pub fn write_materials(&self, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join("materials.toml");
        std::fs::write(&path, content).expect("Failed to write test materials");
        path
    }

    /// Path of a generated file in the output directory
    pub fn output(&self, file: &str) -> PathBuf {
        self.out_dir.join(file)
    }

    /// Read a generated file
    pub fn read_output(&self, file: &str) -> String {
        read(&self.output(file))
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

/// Assert a shader source contains a line (ignoring indentation)
pub fn assert_has_line(source: &str, line: &str) {
    assert!(
        source.lines().any(|l| l.trim() == line),
        "expected line `{}` in:\n{}",
        line,
        source
    );
}
