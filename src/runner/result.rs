//! Structured results for one execution attempt.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mutually exclusive classification of one execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Run phase exited zero. Captured stdout is meaningful (possibly empty).
    Success,
    /// Compile phase exited non-zero or exceeded its budget.
    CompileError,
    /// Run phase exited non-zero, or a process could not be spawned.
    RuntimeError,
    /// Run phase exceeded its budget.
    Timeout,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::CompileError => write!(f, "compile_error"),
            Outcome::RuntimeError => write!(f, "runtime_error"),
            Outcome::Timeout => write!(f, "timeout"),
        }
    }
}

/// Outcome record for one submission.
///
/// `stdout` is defined only when `outcome` is [`Outcome::Success`]; `error`
/// carries captured stderr, a synthetic timeout message, or spawn failure
/// text for the non-success outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Classification of this attempt.
    pub outcome: Outcome,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr or synthetic error text.
    pub error: String,
    /// Wall-clock time from workspace acquisition to run completion.
    pub elapsed: Duration,
    /// Timestamp when the execution started.
    pub started_at: DateTime<Utc>,
    /// Timestamp when the execution completed.
    pub completed_at: DateTime<Utc>,
}

impl ExecutionResult {
    fn record(outcome: Outcome, stdout: String, error: String, elapsed: Duration) -> Self {
        let now = Utc::now();
        Self {
            outcome,
            stdout,
            error,
            elapsed,
            started_at: now - chrono::Duration::from_std(elapsed).unwrap_or_default(),
            completed_at: now,
        }
    }

    /// Creates a successful result from captured stdout.
    pub fn success(stdout: impl Into<String>, elapsed: Duration) -> Self {
        Self::record(Outcome::Success, stdout.into(), String::new(), elapsed)
    }

    /// Creates a compile-failure result from compiler diagnostics.
    pub fn compile_error(error: impl Into<String>, elapsed: Duration) -> Self {
        Self::record(Outcome::CompileError, String::new(), error.into(), elapsed)
    }

    /// Creates a runtime-failure result from captured stderr or spawn error text.
    pub fn runtime_error(error: impl Into<String>, elapsed: Duration) -> Self {
        Self::record(Outcome::RuntimeError, String::new(), error.into(), elapsed)
    }

    /// Creates a timeout result for a run phase that exceeded its budget.
    pub fn timeout(limit: Duration, elapsed: Duration) -> Self {
        Self::record(
            Outcome::Timeout,
            String::new(),
            format!("execution timed out after {:.1}s", limit.as_secs_f64()),
            elapsed,
        )
    }

    /// Returns true if the run phase completed with a zero exit.
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}
