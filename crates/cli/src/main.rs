use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use config::Overrides;
use failure::Failure;
use lexis_lookup::{ensure_renderable, render, resolve, OutputMode, Resolution};
use lexis_wordnet::WordNetDatabase;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod corpus;
mod failure;

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let newline: &[u8] = if text.ends_with('\n') { b"" } else { b"\n" };
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(newline))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn non_empty(value: &str) -> std::result::Result<String, String> {
    if value.trim().is_empty() {
        return Err("the word must not be empty".to_string());
    }
    Ok(value.to_string())
}

#[derive(Parser)]
#[command(name = "lexis")]
#[command(about = "Look up definitions and relations of a word in WordNet", long_about = None)]
#[command(version)]
struct Cli {
    /// Word to look up
    #[arg(long, value_parser = non_empty)]
    word: String,

    /// Print grid tables instead of JSON
    #[arg(short, long)]
    formatted: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Config file (default: <config dir>/lexis/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the WordNet database files
    #[arg(long)]
    wordnet_dir: Option<PathBuf>,

    /// Archive to fetch when the database is missing
    #[arg(long)]
    corpus_url: Option<String>,

    /// Never download; fail if the database is missing
    #[arg(long)]
    offline: bool,

    /// Maximum number of "did you mean" suggestions
    #[arg(long)]
    max_suggestions: Option<usize>,

    /// Minimum similarity (0-1) for a suggestion
    #[arg(long)]
    suggestion_cutoff: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            wordnet_dir: self.wordnet_dir.clone(),
            corpus_url: self.corpus_url.clone(),
            offline: self.offline,
            max_suggestions: self.max_suggestions,
            suggestion_cutoff: self.suggestion_cutoff,
            pretty: self.pretty,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();

    // JSON goes to stdout; keep stderr down to warnings unless asked otherwise
    let structured = !cli.formatted;
    if structured && !cli.verbose {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match run(&cli).await {
        Ok(code) => code,
        Err(failure) => {
            failure.report(structured);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> std::result::Result<ExitCode, Failure> {
    let requested = if cli.formatted {
        OutputMode::Formatted
    } else {
        OutputMode::Structured { pretty: false }
    };
    ensure_renderable(requested).map_err(|err| Failure::renderer_unavailable(&err))?;

    let env = |key: &str| env::var(key).ok();
    let overrides = cli.overrides();
    let file = config::load_file(overrides.config.as_deref(), &env)?;
    let settings = config::resolve(&overrides, file, &env)?;
    let mode = match requested {
        OutputMode::Structured { .. } => OutputMode::Structured {
            pretty: settings.pretty,
        },
        formatted => formatted,
    };

    if let Some(report) = corpus::ensure_corpus(&settings.corpus, !cli.quiet).await? {
        log::debug!(
            "{}",
            serde_json::to_string(&report).context("Failed to serialize fetch report")?
        );
    }

    let db = WordNetDatabase::open(&settings.corpus.dir).map_err(|err| {
        Failure::MissingDependency(format!(
            "WordNet database in {} cannot be opened: {err}",
            settings.corpus.dir.display()
        ))
    })?;

    let resolution =
        resolve(&db, &cli.word, &settings.suggest).context("Failed to look up word")?;
    match resolution {
        Resolution::Found(result) => {
            let text = render(&result, mode).context("Failed to render output")?;
            print_stdout(&text)?;
            Ok(ExitCode::SUCCESS)
        }
        Resolution::NotFound(missing) => {
            print_stdout(&missing.to_string())?;
            Ok(ExitCode::FAILURE)
        }
    }
}
