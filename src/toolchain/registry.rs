//! Lookup table from language to toolchain recipe.

use std::collections::HashMap;
use std::time::Duration;

use super::{CommandTemplate, Language, ToolchainRecipe};

/// Interpreter binary for the Python recipe.
const PYTHON_BIN: &str = if cfg!(windows) { "python" } else { "python3" };

/// Executable name produced by the C++ recipe.
const CPP_ARTIFACT: &str = if cfg!(windows) { "main.exe" } else { "a.out" };

/// Static mapping from [`Language`] to its [`ToolchainRecipe`].
///
/// Purely a lookup table; holds no runtime state. A missing entry is a
/// caller-input error surfaced by the engine before any process is spawned.
#[derive(Debug, Clone, Default)]
pub struct ToolchainRegistry {
    recipes: HashMap<Language, ToolchainRecipe>,
}

impl ToolchainRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in recipes at the documented
    /// default budgets (10s compile, 5s run).
    pub fn with_defaults(compile_timeout: Duration, run_timeout: Duration) -> Self {
        Self::new()
            .with_recipe(ToolchainRecipe::interpreted(
                Language::Python,
                "main.py",
                CommandTemplate::new(PYTHON_BIN, &["{source}"]),
                run_timeout,
            ))
            .with_recipe(
                ToolchainRecipe::compiled(
                    Language::Java,
                    "Main.java",
                    CommandTemplate::new("javac", &["{source}"]),
                    CommandTemplate::new("java", &["-cp", "{dir}", "Main"]),
                    compile_timeout,
                    run_timeout,
                ),
            )
            .with_recipe(
                ToolchainRecipe::compiled(
                    Language::Cpp,
                    "main.cpp",
                    CommandTemplate::new("g++", &["{source}", "-o", "{artifact}"]),
                    CommandTemplate::new("{artifact}", &[]),
                    compile_timeout,
                    run_timeout,
                )
                .with_artifact(CPP_ARTIFACT),
            )
    }

    /// Registers a recipe, replacing any existing entry for its language.
    pub fn with_recipe(mut self, recipe: ToolchainRecipe) -> Self {
        self.register(recipe);
        self
    }

    /// Registers a recipe in place.
    pub fn register(&mut self, recipe: ToolchainRecipe) {
        self.recipes.insert(recipe.language, recipe);
    }

    /// Looks up the recipe for a language.
    pub fn recipe(&self, language: Language) -> Option<&ToolchainRecipe> {
        self.recipes.get(&language)
    }

    /// Languages with a registered recipe, in stable order.
    pub fn supported(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.recipes.keys().copied().collect();
        languages.sort();
        languages
    }
}
