use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub fn tm_cmd() -> Command {
    Command::cargo_bin("tm").expect("binary")
}

/// Scratch directory for CLI runs that need a `.tm.toml`.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join(".tm.toml");
        std::fs::write(&path, contents).expect("write config");
        path
    }
}
