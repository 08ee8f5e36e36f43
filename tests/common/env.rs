//! Isolated test environment for ContextMark.
//!
//! `TestLibrary` owns a temp home directory holding the library
//! (`~/.contextmark`), the user config dir (`~/.claude`) and one project
//! (`~/work/app`). The library API is driven through an `Environment` built
//! from the same paths, and the CLI through the built binary with
//! `CONTEXTMARK_HOME` pointing at the temp home.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use contextmark::application::LibraryUseCase;
use contextmark::infrastructure::FsContentStore;
use contextmark::Environment;

use super::fixtures::{block_file, profile_file};

/// Result of running the contextmark binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestLibrary {
    pub home: TempDir,
    pub env: Environment,
    pub project: PathBuf,
}

impl TestLibrary {
    /// Initialized library plus an empty project directory
    pub fn new() -> Self {
        let lib = Self::bare();
        LibraryUseCase::new(lib.env.clone())
            .init(false)
            .expect("library init");
        lib
    }

    /// Home and project directories only, no library
    pub fn bare() -> Self {
        let home = tempfile::tempdir().expect("temp home");
        let env = Environment::with_home(home.path());
        let project = home.path().join("work/app");
        std::fs::create_dir_all(&project).expect("project dir");
        Self { home, env, project }
    }

    pub fn store(&self) -> FsContentStore {
        FsContentStore::new(self.env.library().clone())
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home.path().join(relative)
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project.join(relative)
    }

    pub fn library_path(&self, relative: &str) -> PathBuf {
        self.env.library().root().join(relative)
    }

    /// Write (or overwrite) a block file directly in the library
    pub fn write_block(&self, slug: &str, version: &str, body: &str) {
        let name = slug.rsplit('/').next().unwrap_or(slug);
        write_file(
            &self.env.library().block_path(slug),
            &block_file(name, version, body),
        );
    }

    pub fn write_profile(&self, slug: &str, blocks: &[&str]) {
        write_file(
            &self.env.library().profile_path(slug),
            &profile_file(slug, blocks),
        );
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        write_file(&self.project_path(relative), content);
    }

    pub fn write_home_file(&self, relative: &str, content: &str) {
        write_file(&self.home_path(relative), content);
    }

    pub fn write_library_file(&self, relative: &str, content: &str) {
        write_file(&self.library_path(relative), content);
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    pub fn read_project_file(&self, relative: &str) -> String {
        self.read(&self.project_path(relative))
    }

    /// Run the binary from the project directory
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(&self.project, args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_contextmark"))
            .current_dir(cwd)
            .args(args)
            .env("CONTEXTMARK_HOME", self.home.path())
            .env_remove("CONTEXTMARK_LIBRARY")
            .env_remove("CONTEXTMARK_LOG")
            .output()
            .expect("Failed to execute contextmark");

        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
