//! Test environment builder for isolated Pantry testing.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a Pantry CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated workspace: the CLI runs from its root, with HOME and the user
/// config directory pointed inside it.
pub struct TestEnv {
    pub workspace: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let workspace = tempfile::tempdir().unwrap();
        fs::create_dir_all(workspace.path().join("home")).unwrap();
        Self { workspace }
    }

    /// Workspace with `pantry.toml`, the standard inventory and the given packages
    pub fn with_packages(files: &[(&str, &str)]) -> Self {
        let env = Self::new();
        env.write("pantry.toml", super::fixtures::SETTINGS);
        env.write("inventory.toml", super::fixtures::INVENTORY);
        write_tree(&env.path("packages"), files);
        env
    }

    /// Get path relative to the workspace
    pub fn path(&self, relative: &str) -> PathBuf {
        self.workspace.path().join(relative)
    }

    /// Write a file relative to the workspace, creating parents
    pub fn write(&self, relative: &str, content: &str) {
        write_tree(self.workspace.path(), &[(relative, content)]);
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    /// Run the pantry binary from the workspace root
    pub fn run(&self, args: &[&str]) -> TestResult {
        let home = self.path("home");
        let output = Command::new(env!("CARGO_BIN_EXE_pantry"))
            .current_dir(self.workspace.path())
            .args(args)
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env_remove("PANTRY_PACKAGE_DIR")
            .env_remove("PANTRY_FILE_IGNORES")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute pantry");

        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Create each `(relative path, content)` below `root`
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}
