//! The execution engine: materialize, compile, run, classify.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::toolchain::{Language, ToolchainRecipe, ToolchainRegistry};

use super::config::EngineConfig;
use super::result::ExecutionResult;
use super::submission::Submission;
use super::workspace::{Workspace, WorkspaceError};

/// Errors that abort an execution before or outside the subprocess phases.
///
/// Phase failures (compile errors, runtime errors, timeouts) are not errors
/// at this level; they come back classified inside [`ExecutionResult`].
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(Language),

    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
}

/// Outcome of one bounded subprocess phase.
enum PhaseOutcome {
    /// Process ran to completion (any exit code).
    Completed(std::process::Output),
    /// Process exceeded its budget and was killed.
    DeadlineExceeded,
    /// Process could not be spawned or waited on.
    Failed(std::io::Error),
}

/// What the compile+run pipeline produced, before elapsed time is attached.
enum Classified {
    Success { stdout: String },
    CompileError { error: String },
    RuntimeError { error: String },
    Timeout { limit: Duration },
}

/// The multi-language execution engine.
///
/// Stateless and reentrant: every call owns its workspace and subprocess
/// tree, so concurrent executions are independent by construction. The one
/// piece of shared state is the optional concurrency limiter.
pub struct Engine {
    registry: ToolchainRegistry,
    limiter: Option<Arc<Semaphore>>,
}

impl Engine {
    /// Creates an engine with the built-in toolchains and default budgets.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with the built-in toolchains at configured budgets.
    pub fn with_config(config: EngineConfig) -> Self {
        let registry =
            ToolchainRegistry::with_defaults(config.compile_timeout, config.run_timeout);
        Self::with_registry(registry, &config)
    }

    /// Creates an engine over a caller-supplied registry.
    pub fn with_registry(registry: ToolchainRegistry, config: &EngineConfig) -> Self {
        let limiter = (config.max_concurrent > 0)
            .then(|| Arc::new(Semaphore::new(config.max_concurrent)));
        Self { registry, limiter }
    }

    /// The toolchain registry backing this engine.
    pub fn registry(&self) -> &ToolchainRegistry {
        &self.registry
    }

    /// Executes one submission: writes the source blob into a fresh
    /// workspace, drives the recipe's compile and run phases under their
    /// budgets, and classifies the outcome.
    ///
    /// The workspace is removed on every exit path, including errors.
    pub async fn execute(&self, submission: &Submission) -> Result<ExecutionResult, ExecuteError> {
        let recipe = self
            .registry
            .recipe(submission.language())
            .ok_or(ExecuteError::UnsupportedLanguage(submission.language()))?;

        let _permit = match &self.limiter {
            // The semaphore is never closed, so acquisition only fails in
            // unreachable shutdown states; treat that as no limit.
            Some(limiter) => limiter.clone().acquire_owned().await.ok(),
            None => None,
        };

        let started = Instant::now();
        let workspace = Workspace::create()?;
        info!(
            "Executing {} submission in workspace {}",
            submission.language(),
            workspace.id()
        );

        let classified = self.run_phases(recipe, submission, &workspace).await;
        let elapsed = started.elapsed();
        let closed = workspace.close();

        let classified = classified?;
        closed?;

        let result = match classified {
            Classified::Success { stdout } => ExecutionResult::success(stdout, elapsed),
            Classified::CompileError { error } => ExecutionResult::compile_error(error, elapsed),
            Classified::RuntimeError { error } => ExecutionResult::runtime_error(error, elapsed),
            Classified::Timeout { limit } => ExecutionResult::timeout(limit, elapsed),
        };

        debug!(
            "Submission finished with outcome {} in {:?}",
            result.outcome, result.elapsed
        );
        Ok(result)
    }

    /// Writes the blob and drives the compile and run phases.
    async fn run_phases(
        &self,
        recipe: &ToolchainRecipe,
        submission: &Submission,
        workspace: &Workspace,
    ) -> Result<Classified, ExecuteError> {
        workspace.write_source(&recipe.source_file, &submission.combined_source())?;

        if let Some((program, args)) = recipe.compile_command(workspace.path()) {
            debug!("Compile phase: {} {:?}", program, args);
            match run_bounded(&program, &args, workspace.path(), recipe.compile_timeout).await {
                PhaseOutcome::Completed(output) if !output.status.success() => {
                    return Ok(Classified::CompileError {
                        error: stderr_or_status(&output),
                    });
                }
                PhaseOutcome::Completed(_) => {}
                PhaseOutcome::DeadlineExceeded => {
                    warn!(
                        "Compile phase exceeded {:?} in workspace {}",
                        recipe.compile_timeout,
                        workspace.id()
                    );
                    return Ok(Classified::CompileError {
                        error: format!(
                            "compilation timed out after {:.1}s",
                            recipe.compile_timeout.as_secs_f64()
                        ),
                    });
                }
                PhaseOutcome::Failed(e) => {
                    return Ok(Classified::RuntimeError {
                        error: format!("failed to start {}: {}", program, e),
                    });
                }
            }
        }

        let (program, args) = recipe.run_command(workspace.path());
        debug!("Run phase: {} {:?}", program, args);
        match run_bounded(&program, &args, workspace.path(), recipe.run_timeout).await {
            PhaseOutcome::Completed(output) if output.status.success() => Ok(Classified::Success {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            }),
            PhaseOutcome::Completed(output) => Ok(Classified::RuntimeError {
                error: stderr_or_status(&output),
            }),
            PhaseOutcome::DeadlineExceeded => {
                warn!(
                    "Run phase exceeded {:?} in workspace {}",
                    recipe.run_timeout,
                    workspace.id()
                );
                Ok(Classified::Timeout {
                    limit: recipe.run_timeout,
                })
            }
            PhaseOutcome::Failed(e) => Ok(Classified::RuntimeError {
                error: format!("failed to start {}: {}", program, e),
            }),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns one subprocess with a wall-clock deadline.
///
/// The child gets a null stdin, captured stdout/stderr, and the workspace as
/// its working directory. On deadline expiry the child's whole process group
/// is killed so forked grandchildren cannot outlive the timeout.
async fn run_bounded(program: &str, args: &[String], cwd: &Path, limit: Duration) -> PhaseOutcome {
    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    command.process_group(0);

    let child = match command.spawn() {
        Ok(child) => child,
        Err(e) => return PhaseOutcome::Failed(e),
    };
    let pid = child.id();

    match tokio::time::timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => PhaseOutcome::Completed(output),
        Ok(Err(e)) => PhaseOutcome::Failed(e),
        Err(_) => {
            // kill_on_drop already took the direct child down with the
            // dropped wait future; sweep the rest of its group.
            kill_process_group(pid);
            PhaseOutcome::DeadlineExceeded
        }
    }
}

#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    if let Some(pid) = pid {
        // The child was made its own group leader at spawn, so its pid is
        // the group id.
        unsafe {
            libc::killpg(pid as libc::pid_t, libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: Option<u32>) {}

/// Captured stderr, falling back to the exit status when stderr is empty.
fn stderr_or_status(output: &std::process::Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.trim().is_empty() {
        format!("process exited with {}", output.status)
    } else {
        stderr.into_owned()
    }
}
