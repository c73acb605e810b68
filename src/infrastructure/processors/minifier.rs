use crate::core::interfaces::{MinifierLauncher, MinifierSession};
use crate::core::models::MinifierCommand;
use crate::utils::{BundleError, Logger, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};

/// Runs an external minifier as a child process.
///
/// Input is a pipe fed by the caller. Output goes straight into the target
/// file, so nothing needs draining on our side while we write.
pub struct ProcessMinifier {
    command: MinifierCommand,
}

impl ProcessMinifier {
    pub fn new(command: MinifierCommand) -> Self {
        Self { command }
    }
}

#[async_trait]
impl MinifierLauncher for ProcessMinifier {
    async fn start(&self, target: &Path) -> Result<Box<dyn MinifierSession>> {
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| BundleError::Target {
                    path: target.to_path_buf(),
                    source,
                })?;
        }

        let output = tokio::fs::File::create(target)
            .await
            .map_err(|source| BundleError::Target {
                path: target.to_path_buf(),
                source,
            })?
            .into_std()
            .await;

        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::from(output))
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        if let Some(dir) = &self.command.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| BundleError::Launch {
            program: self.command.program.clone(),
            source,
        })?;

        let stdin = child.stdin.take();
        Logger::minifier_started(&self.command.program, target);

        Ok(Box::new(ProcessSession {
            target: target.to_path_buf(),
            child,
            stdin,
        }))
    }

    fn name(&self) -> &str {
        &self.command.program
    }
}

/// One running minifier, owned by exactly one bundle build.
pub struct ProcessSession {
    target: PathBuf,
    child: Child,
    stdin: Option<ChildStdin>,
}

#[async_trait]
impl MinifierSession for ProcessSession {
    async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let stdin = self.stdin.as_mut().ok_or_else(|| {
            BundleError::write(
                &self.target,
                std::io::Error::new(std::io::ErrorKind::BrokenPipe, "minifier input is closed"),
            )
        })?;

        stdin
            .write_all(bytes)
            .await
            .map_err(|e| BundleError::write(&self.target, e))
    }

    async fn finish(mut self: Box<Self>) -> Result<()> {
        if let Some(mut stdin) = self.stdin.take() {
            stdin
                .flush()
                .await
                .map_err(|e| BundleError::write(&self.target, e))?;
            // Dropping the handle closes the pipe: end of input for the minifier.
            drop(stdin);
        }

        let status = self.child.wait().await?;
        // Killed by a signal: no code, report -1.
        let code = status.code().unwrap_or(-1);
        Logger::minifier_exited(&self.target, code);

        if status.success() {
            Ok(())
        } else {
            Err(BundleError::Process {
                target: self.target.clone(),
                code,
            })
        }
    }

    async fn abort(mut self: Box<Self>) {
        drop(self.stdin.take());
        if let Err(e) = self.child.kill().await {
            Logger::warn(&format!(
                "Could not stop minifier for {}: {}",
                self.target.display(),
                e
            ));
        }
    }
}

#[derive(Debug, Clone)]
pub struct MinificationStats {
    pub original_size: usize,
    pub minified_size: u64,
}

impl MinificationStats {
    pub fn reduction_percentage(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let original = self.original_size as f64;
        ((original - self.minified_size as f64) / original) * 100.0
    }
}

impl std::fmt::Display for MinificationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1}% reduction ({} → {} bytes)",
            self.reduction_percentage(),
            self.original_size,
            self.minified_size
        )
    }
}
