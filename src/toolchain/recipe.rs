//! Build/run recipes for one language.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Language;

/// Placeholder for the workspace directory in a command template.
pub const DIR_PLACEHOLDER: &str = "{dir}";
/// Placeholder for the materialized source file path.
pub const SOURCE_PLACEHOLDER: &str = "{source}";
/// Placeholder for the build artifact path.
pub const ARTIFACT_PLACEHOLDER: &str = "{artifact}";

/// An argument-vector command with workspace placeholders.
///
/// Rendered commands are passed to the OS as a program plus discrete
/// arguments. User source text never reaches a shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandTemplate {
    /// Program to invoke. May itself be a placeholder (e.g. the built artifact).
    pub program: String,
    /// Arguments, each possibly containing placeholders.
    pub args: Vec<String>,
}

impl CommandTemplate {
    /// Creates a template from a program and arguments.
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Renders the template against a workspace, substituting placeholders.
    pub fn render(&self, workspace: &Path, source: &Path, artifact: &Path) -> (String, Vec<String>) {
        let substitute = |part: &str| -> String {
            part.replace(DIR_PLACEHOLDER, &workspace.to_string_lossy())
                .replace(SOURCE_PLACEHOLDER, &source.to_string_lossy())
                .replace(ARTIFACT_PLACEHOLDER, &artifact.to_string_lossy())
        };

        (
            substitute(&self.program),
            self.args.iter().map(|a| substitute(a)).collect(),
        )
    }
}

/// The build/run recipe for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainRecipe {
    /// Language this recipe serves.
    pub language: Language,
    /// Deterministic file name the source blob is written under.
    pub source_file: String,
    /// Build artifact file name, when the toolchain produces one.
    pub artifact_file: Option<String>,
    /// Compile command; absent for interpreted languages.
    pub compile: Option<CommandTemplate>,
    /// Run command.
    pub run: CommandTemplate,
    /// Wall-clock bound for the compile phase.
    pub compile_timeout: Duration,
    /// Wall-clock bound for the run phase.
    pub run_timeout: Duration,
}

impl ToolchainRecipe {
    /// Creates an interpreted-language recipe (no compile phase).
    pub fn interpreted(
        language: Language,
        source_file: impl Into<String>,
        run: CommandTemplate,
        run_timeout: Duration,
    ) -> Self {
        Self {
            language,
            source_file: source_file.into(),
            artifact_file: None,
            compile: None,
            run,
            compile_timeout: Duration::ZERO,
            run_timeout,
        }
    }

    /// Creates a compiled-language recipe.
    pub fn compiled(
        language: Language,
        source_file: impl Into<String>,
        compile: CommandTemplate,
        run: CommandTemplate,
        compile_timeout: Duration,
        run_timeout: Duration,
    ) -> Self {
        Self {
            language,
            source_file: source_file.into(),
            artifact_file: None,
            compile: Some(compile),
            run,
            compile_timeout,
            run_timeout,
        }
    }

    /// Sets the build artifact file name.
    pub fn with_artifact(mut self, artifact_file: impl Into<String>) -> Self {
        self.artifact_file = Some(artifact_file.into());
        self
    }

    /// Overrides the compile timeout.
    pub fn with_compile_timeout(mut self, timeout: Duration) -> Self {
        self.compile_timeout = timeout;
        self
    }

    /// Overrides the run timeout.
    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }

    /// Path of the materialized source file inside a workspace.
    pub fn source_path(&self, workspace: &Path) -> std::path::PathBuf {
        workspace.join(&self.source_file)
    }

    /// Path of the build artifact inside a workspace.
    ///
    /// Falls back to the source path for languages without an artifact so
    /// template rendering always has a substitution target.
    pub fn artifact_path(&self, workspace: &Path) -> std::path::PathBuf {
        match &self.artifact_file {
            Some(name) => workspace.join(name),
            None => self.source_path(workspace),
        }
    }

    /// Renders the compile command for a workspace, if the recipe has one.
    pub fn compile_command(&self, workspace: &Path) -> Option<(String, Vec<String>)> {
        let compile = self.compile.as_ref()?;
        Some(compile.render(
            workspace,
            &self.source_path(workspace),
            &self.artifact_path(workspace),
        ))
    }

    /// Renders the run command for a workspace.
    pub fn run_command(&self, workspace: &Path) -> (String, Vec<String>) {
        self.run.render(
            workspace,
            &self.source_path(workspace),
            &self.artifact_path(workspace),
        )
    }
}
