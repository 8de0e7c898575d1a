use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Runs the external build and deploy tools from the project root, with
/// their output streaming through. Every exit status is checked.
#[derive(Debug, Clone)]
pub struct Toolchain {
    flutter: PathBuf,
    project_root: PathBuf,
}

impl Toolchain {
    pub fn new(flutter: &Path, project_root: &Path) -> Self {
        Self {
            flutter: flutter.to_path_buf(),
            project_root: project_root.to_path_buf(),
        }
    }

    pub fn clean(&self) -> Result<(), ToolError> {
        self.run(&self.flutter, &["clean"])
    }

    pub fn build_web(&self) -> Result<(), ToolError> {
        self.run(
            &self.flutter,
            &["build", "web", "--release", "--no-tree-shake-icons"],
        )
    }

    pub fn deploy(&self, firebase: &Path) -> Result<(), ToolError> {
        self.run(firebase, &["deploy"])
    }

    fn run(&self, program: &Path, args: &[&str]) -> Result<(), ToolError> {
        let command = command_label(program, args);
        let status = Command::new(program)
            .args(args)
            .current_dir(&self.project_root)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ToolError::Spawn {
                command: command.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed { command, status })
        }
    }
}

fn command_label(program: &Path, args: &[&str]) -> String {
    let name = program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy();
    if args.is_empty() {
        name.into_owned()
    } else {
        format!("{name} {}", args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_label_uses_binary_name_only() {
        let label = command_label(Path::new("/opt/flutter/bin/flutter"), &["clean"]);
        assert_eq!(label, "flutter clean");
    }

    #[test]
    fn spawn_failure_names_the_command() {
        let toolchain = Toolchain::new(
            Path::new("/nonexistent/webship-no-such-tool"),
            Path::new("."),
        );
        let err = toolchain.clean().expect_err("binary does not exist");
        match err {
            ToolError::Spawn { command, .. } => {
                assert_eq!(command, "webship-no-such-tool clean");
            }
            other => panic!("expected spawn error, got {other:?}"),
        }
    }
}
