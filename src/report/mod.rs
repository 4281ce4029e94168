//! Result reporting: pass/fail judgment and collaborator seams.
//!
//! The engine returns a structured [`ExecutionResult`]; this layer turns it
//! into the side effects that depend on it. Reward computation and
//! human-readable feedback live outside this crate, reached through the
//! [`RewardSink`] and [`FeedbackProvider`] traits; they never influence
//! execution itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::runner::{ExecutionResult, Outcome, Submission};

/// Compares captured stdout against an expected output.
///
/// Both sides are trimmed of leading and trailing whitespace and compared
/// for exact equality. Internal whitespace is never normalized.
pub fn output_matches(stdout: &str, expected: &str) -> bool {
    stdout.trim() == expected.trim()
}

/// What a caller should do with one execution result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Classification carried through from the engine, unmodified.
    pub outcome: Outcome,
    /// Pass/fail verdict; present only when an expected output was supplied.
    pub passed: Option<bool>,
    /// Whether debugging assistance should be offered. Runtime failures
    /// warrant it; timeouts get "your program took too long" guidance instead.
    pub offer_debugging: bool,
    /// Wall-clock time of the execution.
    pub elapsed: Duration,
}

/// Receiver for reward triggers on successful free runs.
pub trait RewardSink: Send + Sync {
    /// Called once per successful free-run execution.
    fn on_success(&self, submission: &Submission, result: &ExecutionResult);
}

/// Receiver for human-feedback requests.
pub trait FeedbackProvider: Send + Sync {
    /// Called once per free-run execution, successful or not.
    fn on_result(&self, submission: &Submission, result: &ExecutionResult);
}

/// Thin layer producing result-dependent side effects.
///
/// Checked runs (submissions carrying a verification snippet) are judged
/// against their expected output; free runs trigger the reward and feedback
/// collaborators instead.
#[derive(Default)]
pub struct Reporter {
    reward: Option<Box<dyn RewardSink>>,
    feedback: Option<Box<dyn FeedbackProvider>>,
}

impl Reporter {
    /// Creates a reporter with no collaborators attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a reward sink.
    pub fn with_reward_sink(mut self, sink: Box<dyn RewardSink>) -> Self {
        self.reward = Some(sink);
        self
    }

    /// Attaches a feedback provider.
    pub fn with_feedback_provider(mut self, provider: Box<dyn FeedbackProvider>) -> Self {
        self.feedback = Some(provider);
        self
    }

    /// Judges one result and fires the collaborator seams.
    pub fn report(&self, submission: &Submission, result: &ExecutionResult) -> Report {
        let passed = submission
            .expected_output()
            .map(|expected| result.is_success() && output_matches(&result.stdout, expected));

        if submission.verification().is_none() {
            if result.is_success() {
                if let Some(reward) = &self.reward {
                    debug!("Triggering reward for successful free run");
                    reward.on_success(submission, result);
                }
            }
            if let Some(feedback) = &self.feedback {
                feedback.on_result(submission, result);
            }
        }

        Report {
            outcome: result.outcome,
            passed,
            offer_debugging: result.outcome == Outcome::RuntimeError,
            elapsed: result.elapsed,
        }
    }
}
