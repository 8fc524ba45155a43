//! Test environment builder for isolated stack-rotate runs.
//!
//! Provides `TestEnv` - a temp directory holding the compose file, a staging
//! directory and optionally a fake docker binary, plus helpers to run the CLI.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables the CLI reads as flag fallbacks
const CLI_ENV_VARS: [&str; 5] = [
    "STACK_ROTATE_COMPOSE_FILE",
    "STACK_ROTATE_DOCKER_BINARY",
    "STACK_ROTATE_PREFIX",
    "STACK_ROTATE_STACK",
    "STACK_ROTATE_WORKDIR",
];

/// Directory (relative to the root) the compose file is staged in
pub const STAGE_DIR: &str = "stage";

/// Where the fake docker records its arguments, one per line
pub const DOCKER_ARGS_FILE: &str = "docker-args.txt";

/// Where the fake docker copies the compose file it was given
pub const DOCKER_SEEN_FILE: &str = "docker-seen.yml";

/// Result of running the stack-rotate binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as YAML
    pub fn stdout_yaml(&self) -> serde_yaml_ng::Value {
        serde_yaml_ng::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not YAML ({e}):\n{}", self.stdout))
    }
}

/// Isolated working directory for one CLI run
pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
    docker: Option<PathBuf>,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to the root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Path of the fake docker, if one was installed
    pub fn docker(&self) -> &Path {
        self.docker
            .as_deref()
            .expect("TestEnv was built without a fake docker")
    }

    /// Run stack-rotate from the root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run stack-rotate from the root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .args(args)
            .env_remove("RUST_LOG");

        for key in CLI_ENV_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute stack-rotate");
        output_to_result(output)
    }

    /// Names of the files left in the staging directory
    pub fn staged_files(&self) -> Vec<String> {
        std::fs::read_dir(self.path(STAGE_DIR))
            .expect("Failed to read staging directory")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    /// Arguments the fake docker was called with, if it ran
    pub fn docker_args(&self) -> Option<Vec<String>> {
        std::fs::read_to_string(self.path(DOCKER_ARGS_FILE))
            .ok()
            .map(|content| content.lines().map(str::to_string).collect())
    }

    /// Compose file content the fake docker was given
    pub fn docker_seen(&self) -> Option<serde_yaml_ng::Value> {
        std::fs::read_to_string(self.path(DOCKER_SEEN_FILE))
            .ok()
            .map(|content| serde_yaml_ng::from_str(&content).expect("fake docker saw invalid YAML"))
    }

    pub fn write_file(&self, relative_path: &str, content: &str) {
        let full_path = self.path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    compose: Option<String>,
    docker_exit_code: Option<i32>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            compose: None,
            docker_exit_code: None,
        }
    }

    /// Write `docker-compose.yml` at the root
    pub fn with_compose(mut self, content: &str) -> Self {
        self.compose = Some(content.to_string());
        self
    }

    /// Install a fake docker script that exits with `code`
    pub fn with_fake_docker(mut self, code: i32) -> Self {
        self.docker_exit_code = Some(code);
        self
    }

    pub fn build(self) -> TestEnv {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(root.path().join(STAGE_DIR))
            .expect("Failed to create staging directory");

        if let Some(compose) = &self.compose {
            std::fs::write(root.path().join("docker-compose.yml"), compose)
                .expect("Failed to write compose file");
        }

        let docker = self
            .docker_exit_code
            .map(|code| write_fake_docker(root.path(), code));

        TestEnv {
            root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_stack-rotate")),
            docker,
        }
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a `/bin/sh` script that records its arguments and the compose file
/// (`-c <file>` is the fourth argument) next to itself, then exits with `code`.
fn write_fake_docker(dir: &Path, code: i32) -> PathBuf {
    let script = format!(
        "#!/bin/sh\n\
         here=\"$(dirname \"$0\")\"\n\
         printf '%s\\n' \"$@\" > \"$here/{DOCKER_ARGS_FILE}\"\n\
         cp \"$4\" \"$here/{DOCKER_SEEN_FILE}\"\n\
         exit {code}\n"
    );
    let path = dir.join("fake-docker");
    std::fs::write(&path, script).expect("Failed to write fake docker");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake docker executable");
    }

    path
}
