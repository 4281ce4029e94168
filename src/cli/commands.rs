//! CLI command definitions for polyrun.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::info;

use crate::report::Reporter;
use crate::runner::{Engine, EngineConfig, Outcome, Submission};
use crate::toolchain::Language;

/// Multi-language code execution engine.
#[derive(Parser)]
#[command(name = "polyrun")]
#[command(about = "Compile, run and judge source files under bounded time budgets")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "warn", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Execute a source file and report the outcome.
    Run(RunArgs),

    /// List registered languages and their budgets.
    Languages,
}

/// Arguments for `polyrun run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Source file to execute.
    pub file: PathBuf,

    /// Language tag (python, java, c++); inferred from the file extension
    /// when omitted.
    #[arg(short = 'L', long)]
    pub language: Option<String>,

    /// File whose contents are appended to the source as a verification
    /// snippet before execution.
    #[arg(long)]
    pub verify: Option<PathBuf>,

    /// Expected output for pass/fail judgment.
    #[arg(long)]
    pub expect: Option<String>,

    /// Compile budget in seconds (default 10).
    #[arg(long)]
    pub compile_timeout: Option<u64>,

    /// Run budget in seconds (default 5).
    #[arg(long)]
    pub run_timeout: Option<u64>,

    /// Emit the result as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Parses CLI arguments and runs the selected command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Runs the selected command with pre-parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => run_submission(args).await,
        Commands::Languages => list_languages(),
    }
}

async fn run_submission(args: RunArgs) -> anyhow::Result<()> {
    let language = resolve_language(&args)?;
    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut config = EngineConfig::new();
    if let Some(secs) = args.compile_timeout {
        config = config.with_compile_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = args.run_timeout {
        config = config.with_run_timeout(Duration::from_secs(secs));
    }

    let mut submission = Submission::new(source, language);
    if let Some(verify_path) = &args.verify {
        let snippet = fs::read_to_string(verify_path)
            .with_context(|| format!("failed to read {}", verify_path.display()))?;
        submission = submission.with_verification(snippet);
    }
    if let Some(expected) = &args.expect {
        submission = submission.with_expected_output(expected.clone());
    }

    info!("Running {} as {}", args.file.display(), language);
    let engine = Engine::with_config(config);
    let result = engine.execute(&submission).await?;
    let report = Reporter::new().report(&submission, &result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result.outcome {
        Outcome::Success => {
            print!("{}", result.stdout);
            if !result.stdout.ends_with('\n') && !result.stdout.is_empty() {
                println!();
            }
        }
        _ => eprintln!("{}: {}", result.outcome, result.error.trim_end()),
    }
    eprintln!("time: {:.3}s", result.elapsed.as_secs_f64());

    if let Some(expected) = submission.expected_output() {
        if report.passed.unwrap_or(false) {
            eprintln!("check: passed");
        } else {
            eprintln!(
                "check: failed (expected {:?}, got {:?})",
                expected.trim(),
                result.stdout.trim()
            );
            return Err(anyhow!("output check failed"));
        }
    }

    Ok(())
}

fn resolve_language(args: &RunArgs) -> anyhow::Result<Language> {
    if let Some(tag) = &args.language {
        return tag.parse::<Language>().map_err(Into::into);
    }
    args.file
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
        .ok_or_else(|| {
            anyhow!(
                "cannot infer language from {}; pass --language",
                args.file.display()
            )
        })
}

fn list_languages() -> anyhow::Result<()> {
    let engine = Engine::new();
    for language in engine.registry().supported() {
        // Recipe presence is guaranteed for supported languages.
        if let Some(recipe) = engine.registry().recipe(language) {
            let compile = match &recipe.compile {
                Some(template) => format!(
                    "{} ({:.0}s)",
                    template.program,
                    recipe.compile_timeout.as_secs_f64()
                ),
                None => "-".to_string(),
            };
            println!(
                "{:<8} compile: {:<14} run: {} ({:.0}s)",
                language.to_string(),
                compile,
                recipe.run.program,
                recipe.run_timeout.as_secs_f64()
            );
        }
    }
    Ok(())
}
