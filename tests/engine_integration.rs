//! End-to-end execution tests against real toolchains.
//!
//! Tests that need an interpreter or compiler skip themselves when the
//! binary is absent from the host, so the suite stays green on minimal
//! images.

use std::time::{Duration, Instant};

use polyrun::{
    Engine, EngineConfig, ExecuteError, Language, Outcome, Reporter, Submission,
    ToolchainRegistry,
};

const PYTHON: &str = if cfg!(windows) { "python" } else { "python3" };

fn toolchain_available(binary: &str) -> bool {
    std::process::Command::new(binary)
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn default_engine() -> Engine {
    Engine::new()
}

#[tokio::test]
async fn python_print_literal_succeeds() {
    if !toolchain_available(PYTHON) {
        eprintln!("skipping: {} not installed", PYTHON);
        return;
    }

    let result = default_engine()
        .execute(&Submission::new("print(2 + 2)", Language::Python))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.stdout.trim(), "4");
    assert!(result.error.is_empty());
    assert!(result.elapsed > Duration::ZERO);
}

#[tokio::test]
async fn python_division_by_zero_is_runtime_error() {
    if !toolchain_available(PYTHON) {
        eprintln!("skipping: {} not installed", PYTHON);
        return;
    }

    let result = default_engine()
        .execute(&Submission::new("print(1/0)", Language::Python))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::RuntimeError);
    assert!(result.error.contains("division"), "stderr: {}", result.error);
    assert!(result.stdout.is_empty());
}

#[tokio::test]
async fn python_syntax_error_is_runtime_error() {
    if !toolchain_available(PYTHON) {
        eprintln!("skipping: {} not installed", PYTHON);
        return;
    }

    // Interpreted languages have no compile phase, so even a parse failure
    // surfaces from the run phase.
    let result = default_engine()
        .execute(&Submission::new("def broken(:", Language::Python))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::RuntimeError);
    assert!(!result.error.is_empty());
}

#[tokio::test]
async fn python_empty_source_succeeds_with_empty_stdout() {
    if !toolchain_available(PYTHON) {
        eprintln!("skipping: {} not installed", PYTHON);
        return;
    }

    let result = default_engine()
        .execute(&Submission::new("", Language::Python))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Success);
    assert!(result.stdout.is_empty());
}

#[tokio::test]
async fn python_sleep_exceeding_budget_times_out() {
    if !toolchain_available(PYTHON) {
        eprintln!("skipping: {} not installed", PYTHON);
        return;
    }

    let engine = Engine::with_config(EngineConfig::new().with_run_timeout(Duration::from_secs(1)));
    let started = Instant::now();
    let result = engine
        .execute(&Submission::new(
            "import time\ntime.sleep(30)",
            Language::Python,
        ))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Timeout);
    assert!(result.error.contains("timed out"));
    // The caller is released shortly after the deadline, not after the sleep.
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn verification_snippet_shares_scope_with_user_code() {
    if !toolchain_available(PYTHON) {
        eprintln!("skipping: {} not installed", PYTHON);
        return;
    }

    let submission = Submission::new(
        "def add(a, b):\n    return a + b",
        Language::Python,
    )
    .with_verification("print(add(2, 3))")
    .with_expected_output("5");

    let result = default_engine().execute(&submission).await.unwrap();
    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.stdout.trim(), "5");

    let report = Reporter::new().report(&submission, &result);
    assert_eq!(report.passed, Some(true));
}

#[tokio::test]
async fn failing_verification_snippet_surfaces_as_runtime_error() {
    if !toolchain_available(PYTHON) {
        eprintln!("skipping: {} not installed", PYTHON);
        return;
    }

    // User code and snippet run in one process; a failure in either comes
    // back as the same runtime error, without attribution.
    let submission = Submission::new("def add(a, b):\n    return a + b", Language::Python)
        .with_verification("assert add(2, 2) == 5");

    let result = default_engine().execute(&submission).await.unwrap();
    assert_eq!(result.outcome, Outcome::RuntimeError);
    assert!(result.error.contains("AssertionError"), "stderr: {}", result.error);
}

#[tokio::test]
async fn concurrent_executions_are_independent() {
    if !toolchain_available(PYTHON) {
        eprintln!("skipping: {} not installed", PYTHON);
        return;
    }

    let engine = default_engine();
    let first = Submission::new("print('alpha' * 3)", Language::Python);
    let second = Submission::new("print('omega' * 3)", Language::Python);

    let (a, b) = tokio::join!(engine.execute(&first), engine.execute(&second));
    let a = a.unwrap();
    let b = b.unwrap();

    assert_eq!(a.stdout.trim(), "alphaalphaalpha");
    assert_eq!(b.stdout.trim(), "omegaomegaomega");
}

#[tokio::test]
async fn identical_submissions_yield_independent_results() {
    if !toolchain_available(PYTHON) {
        eprintln!("skipping: {} not installed", PYTHON);
        return;
    }

    let engine = default_engine();
    let submission = Submission::new("print(6 * 7)", Language::Python);

    let (a, b) = tokio::join!(engine.execute(&submission), engine.execute(&submission));
    assert_eq!(a.unwrap().stdout.trim(), "42");
    assert_eq!(b.unwrap().stdout.trim(), "42");
}

#[tokio::test]
async fn bounded_engine_still_completes_all_submissions() {
    if !toolchain_available(PYTHON) {
        eprintln!("skipping: {} not installed", PYTHON);
        return;
    }

    let engine = Engine::with_config(EngineConfig::new().with_max_concurrent(1));
    let submission = Submission::new("print('ok')", Language::Python);

    let (a, b, c) = tokio::join!(
        engine.execute(&submission),
        engine.execute(&submission),
        engine.execute(&submission)
    );
    for result in [a.unwrap(), b.unwrap(), c.unwrap()] {
        assert_eq!(result.stdout.trim(), "ok");
    }
}

#[tokio::test]
async fn unsupported_language_spawns_nothing() {
    let engine = Engine::with_registry(ToolchainRegistry::new(), &EngineConfig::new());
    let started = Instant::now();

    let err = engine
        .execute(&Submission::new("print(1)", Language::Python))
        .await
        .unwrap_err();

    assert!(matches!(err, ExecuteError::UnsupportedLanguage(_)));
    // Fails fast: no workspace, no subprocess.
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[tokio::test]
async fn java_missing_semicolon_is_compile_error() {
    if !toolchain_available("javac") || !toolchain_available("java") {
        eprintln!("skipping: JDK not installed");
        return;
    }

    let source = r#"
public class Main {
    public static void main(String[] args) {
        System.out.println("hi")
    }
}
"#;
    let result = default_engine()
        .execute(&Submission::new(source, Language::Java))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::CompileError);
    assert!(result.stdout.is_empty());
    assert!(!result.error.is_empty());
}

#[tokio::test]
async fn java_print_literal_succeeds() {
    if !toolchain_available("javac") || !toolchain_available("java") {
        eprintln!("skipping: JDK not installed");
        return;
    }

    let source = r#"
public class Main {
    public static void main(String[] args) {
        System.out.println("greetings");
    }
}
"#;
    let result = default_engine()
        .execute(&Submission::new(source, Language::Java))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.stdout.trim(), "greetings");
}

#[tokio::test]
async fn cpp_print_literal_succeeds() {
    if !toolchain_available("g++") {
        eprintln!("skipping: g++ not installed");
        return;
    }

    let source = r#"
#include <iostream>
int main() {
    std::cout << "greetings" << std::endl;
    return 0;
}
"#;
    let result = default_engine()
        .execute(&Submission::new(source, Language::Cpp))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.stdout.trim(), "greetings");
}

#[tokio::test]
async fn cpp_missing_semicolon_is_compile_error() {
    if !toolchain_available("g++") {
        eprintln!("skipping: g++ not installed");
        return;
    }

    let source = r#"
#include <iostream>
int main() {
    std::cout << "hi"
    return 0;
}
"#;
    let result = default_engine()
        .execute(&Submission::new(source, Language::Cpp))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::CompileError);
    assert!(!result.error.is_empty());
}
