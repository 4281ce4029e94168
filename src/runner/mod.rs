//! Execution engine for user-submitted code.
//!
//! # Architecture
//!
//! ```text
//! Submission → Engine → Workspace (temp dir) → compile phase? → run phase → ExecutionResult
//! ```
//!
//! The engine:
//! 1. Looks up the toolchain recipe for the submission's language
//! 2. Materializes source (plus any verification snippet) into a scoped workspace
//! 3. Drives the compile phase, when the recipe has one, under its budget
//! 4. Drives the run phase under its budget, killing the process group on expiry
//! 5. Classifies the outcome and removes the workspace on every exit path
//!
//! # Example
//!
//! ```ignore
//! use polyrun::runner::{Engine, EngineConfig, Submission};
//! use polyrun::toolchain::Language;
//!
//! let engine = Engine::with_config(EngineConfig::new());
//! let submission = Submission::new("print(2 + 2)", Language::Python)
//!     .with_expected_output("4");
//!
//! let result = engine.execute(&submission).await?;
//! println!("{}: {}", result.outcome, result.stdout.trim());
//! ```

pub mod config;
pub mod executor;
pub mod result;
pub mod submission;
pub mod workspace;

pub use config::{EngineConfig, DEFAULT_COMPILE_TIMEOUT, DEFAULT_RUN_TIMEOUT};
pub use executor::{Engine, ExecuteError};
pub use result::{ExecutionResult, Outcome};
pub use submission::Submission;
pub use workspace::{Workspace, WorkspaceError};
