//! Shared testing utilities for folio CLI tests.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work = root.child("work");
        work.create_dir_all().expect("Failed to create test work directory");
        let work_dir = work.path().to_path_buf();

        Self { root, work_dir }
    }

    /// Root of the temporary tree; test fixtures live below it.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Working directory of CLI invocations; logs and reports land here by default.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `folio` binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("folio").expect("Failed to locate folio binary");
        cmd.current_dir(&self.work_dir).env_remove("STRAPI_API_TOKEN");
        cmd
    }

    /// Create directories (relative to the root) and return the last one.
    pub fn dirs(&self, relative: &[&str]) -> PathBuf {
        let mut last = self.root().to_path_buf();
        for rel in relative {
            let child = self.root.child(rel);
            child.create_dir_all().expect("Failed to create fixture directory");
            last = child.path().to_path_buf();
        }
        last
    }

    /// Fixture handle for a path relative to the root.
    pub fn child(&self, relative: &str) -> ChildPath {
        self.root.child(relative)
    }

    /// Write a file (relative to the root), creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let child = self.root.child(relative);
        child.write_str(content).expect("Failed to write fixture file");
        child.path().to_path_buf()
    }

    /// Write `folio.toml` into the work directory.
    pub fn write_config(&self, content: &str) {
        fs::write(self.work_dir.join("folio.toml"), content).expect("Failed to write folio.toml");
    }

    /// Read a file from the work directory.
    pub fn read_work_file(&self, name: &str) -> String {
        fs::read_to_string(self.work_dir.join(name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }

    /// Names of files in the work directory starting with `prefix`.
    pub fn work_files_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.work_dir)
            .expect("Failed to list work directory")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(prefix))
            .collect();
        names.sort();
        names
    }
}
