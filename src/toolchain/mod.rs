//! Toolchain registry: language identifiers and their build/run recipes.
//!
//! A recipe is pure data: the file name the source is materialized under,
//! an optional compile command, a run command, and per-step timeouts.
//! Commands are argument vectors rendered against a workspace directory;
//! user source text is never interpolated into a shell string.

pub mod language;
pub mod recipe;
pub mod registry;

pub use language::{Language, UnknownLanguage};
pub use recipe::{CommandTemplate, ToolchainRecipe};
pub use registry::ToolchainRegistry;
