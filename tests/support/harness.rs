use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// TestHarness provides an isolated project directory for running the vstrap
/// binary. The project root is `<tempdir>/sample_project` so the derived
/// project name is stable across runs.
pub struct TestHarness {
    pub dir: TempDir,
    pub root: PathBuf,
    pub vstrap_binary: PathBuf,
}

impl TestHarness {
    /// Creates a project with an empty VEfile.
    pub fn new() -> Self {
        Self::with_vefile("")
    }

    /// Creates a project whose VEfile holds `content`.
    pub fn with_vefile(content: &str) -> Self {
        let harness = Self::without_project();
        fs::write(harness.root.join("VEfile"), content).expect("Failed to write VEfile");
        harness
    }

    /// Creates the project directory without a VEfile.
    pub fn without_project() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join("sample_project");
        fs::create_dir_all(&root).expect("Failed to create project dir");

        TestHarness {
            dir,
            root,
            vstrap_binary: PathBuf::from(env!("CARGO_BIN_EXE_vstrap")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates (if needed) and returns a directory below the project root.
    #[allow(dead_code)]
    pub fn subdir(&self, relative: &str) -> PathBuf {
        let dir = self.root.join(relative);
        fs::create_dir_all(&dir).expect("Failed to create subdirectory");
        dir
    }

    /// Executes vstrap with the given arguments from the project root.
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_in(self.path(), args)
    }

    /// Executes vstrap with the given arguments from `dir`.
    pub fn run_in(&self, dir: &Path, args: &[&str]) -> Output {
        Command::new(&self.vstrap_binary)
            .args(args)
            .current_dir(dir)
            .env_remove("VSTRAP_LOG")
            .output()
            .expect("Failed to run vstrap")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
