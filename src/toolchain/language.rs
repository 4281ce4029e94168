//! Supported language identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A language tag selecting a toolchain recipe.
///
/// Dispatch over languages is a registry lookup, so adding a language means
/// adding a variant here and a recipe in [`crate::toolchain::ToolchainRegistry`],
/// not a new conditional branch at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Interpreted; no compile phase.
    Python,
    /// Compiled via `javac`, run from the class directory.
    Java,
    /// Compiled via `g++` into a standalone executable.
    #[serde(rename = "c++")]
    Cpp,
}

impl Language {
    /// Infers the language from a source file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            "cpp" | "cc" | "cxx" => Some(Language::Cpp),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Python => write!(f, "python"),
            Language::Java => write!(f, "java"),
            Language::Cpp => write!(f, "c++"),
        }
    }
}

/// A language tag that names no known toolchain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported language: {0:?}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "c++" | "cpp" | "cxx" => Ok(Language::Cpp),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}
