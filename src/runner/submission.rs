//! User submissions: source text plus execution context.

use serde::{Deserialize, Serialize};

use crate::toolchain::Language;

/// One user-provided source text to be executed once.
///
/// Immutable once constructed. The optional verification snippet is
/// system-supplied code appended after the user's source in the same
/// compilation/interpretation unit, so it shares scope with user-defined
/// symbols; the optional expected output is what the reporter compares the
/// captured stdout against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    source: String,
    language: Language,
    verification: Option<String>,
    expected_output: Option<String>,
}

impl Submission {
    /// Creates a submission from raw source text and a language.
    pub fn new(source: impl Into<String>, language: Language) -> Self {
        Self {
            source: source.into(),
            language,
            verification: None,
            expected_output: None,
        }
    }

    /// Attaches a verification snippet.
    pub fn with_verification(mut self, snippet: impl Into<String>) -> Self {
        self.verification = Some(snippet.into());
        self
    }

    /// Attaches an expected-output string for pass/fail comparison.
    pub fn with_expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = Some(expected.into());
        self
    }

    /// The raw user source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The selected language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The verification snippet, if any.
    pub fn verification(&self) -> Option<&str> {
        self.verification.as_deref()
    }

    /// The expected output, if any.
    pub fn expected_output(&self) -> Option<&str> {
        self.expected_output.as_deref()
    }

    /// The full blob written to the workspace: user source first, then the
    /// verification snippet on its own line.
    pub fn combined_source(&self) -> String {
        match &self.verification {
            Some(snippet) => format!("{}\n{}", self.source, snippet),
            None => self.source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_submission() {
        let submission = Submission::new("print(1)", Language::Python);
        assert_eq!(submission.source(), "print(1)");
        assert_eq!(submission.language(), Language::Python);
        assert!(submission.verification().is_none());
        assert!(submission.expected_output().is_none());
        assert_eq!(submission.combined_source(), "print(1)");
    }

    #[test]
    fn test_verification_appended_after_source() {
        let submission = Submission::new("def f():\n    return 4", Language::Python)
            .with_verification("print(f())")
            .with_expected_output("4");

        let blob = submission.combined_source();
        assert_eq!(blob, "def f():\n    return 4\nprint(f())");
        let source_at = blob.find("def f").unwrap();
        let check_at = blob.find("print(f())").unwrap();
        assert!(source_at < check_at);
        assert_eq!(submission.expected_output(), Some("4"));
    }
}
