//! polyrun: multi-language code execution engine.
//!
//! Accepts user-submitted source text in one of several supported languages,
//! compiles it when the toolchain needs a build step, runs it under a
//! bounded wall-clock budget, and returns a structured result. A thin
//! reporter layer judges results against expected output and exposes seams
//! for external reward and feedback collaborators.

// Core modules
pub mod cli;
pub mod report;
pub mod runner;
pub mod toolchain;

// Re-export commonly used types
pub use report::{output_matches, Report, Reporter};
pub use runner::{
    Engine, EngineConfig, ExecuteError, ExecutionResult, Outcome, Submission, WorkspaceError,
};
pub use toolchain::{Language, ToolchainRecipe, ToolchainRegistry, UnknownLanguage};
