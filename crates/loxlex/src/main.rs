//! loxlex - streaming lexical scanner for Lox source
//!
//! Usage: loxlex tokenize <file>

use anyhow::Context;
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use codespan_reporting::term::termcolor::ColorChoice;
use loxlex::diagnostics::{DiagnosticSink, PlainEmitter, PrettyEmitter};
use loxlex::stream::StreamConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

/// Diagnostic rendering style
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum DiagnosticStyle {
    /// One `[line N] Error: ...` line per error
    #[default]
    Plain,
    /// Annotated source snippets
    Pretty,
}

/// Color output for pretty diagnostics
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

impl From<Color> for ColorChoice {
    fn from(color: Color) -> Self {
        match color {
            Color::Auto => ColorChoice::Auto,
            Color::Always => ColorChoice::Always,
            Color::Never => ColorChoice::Never,
        }
    }
}

#[derive(ClapParser, Debug)]
#[command(name = "loxlex")]
#[command(version)]
#[command(about = "Streaming lexical scanner for Lox source", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token stream of a source file
    Tokenize {
        /// Input source file
        file: PathBuf,

        /// Diagnostic style (plain or pretty)
        #[arg(long, value_enum, default_value = "plain")]
        diagnostics: DiagnosticStyle,

        /// Color for pretty diagnostics (auto, always, never)
        #[arg(long, value_enum, default_value = "auto")]
        color: Color,

        /// Tokens the scanner may buffer ahead of the printer
        #[arg(long, default_value = "0")]
        capacity: usize,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Install a stderr subscriber when `-v` or `RUST_LOG` asks for one
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("loxlex=debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    match &args.command {
        Command::Tokenize {
            file,
            diagnostics,
            color,
            capacity,
        } => tokenize_file(file, *diagnostics, *color, *capacity),
    }
}

fn tokenize_file(
    path: &Path,
    style: DiagnosticStyle,
    color: Color,
    capacity: usize,
) -> anyhow::Result<ExitCode> {
    let source: Arc<[u8]> = fs::read(path)
        .with_context(|| format!("reading {}", path.display()))?
        .into();
    info!(file = %path.display(), bytes = source.len(), "tokenizing");

    let sink: Box<dyn DiagnosticSink + Send> = match style {
        DiagnosticStyle::Plain => Box::new(PlainEmitter::stderr()),
        DiagnosticStyle::Pretty => Box::new(PrettyEmitter::stderr(
            path.display().to_string(),
            &source,
            color.into(),
        )),
    };

    let config = StreamConfig { capacity };
    let mut out = io::stdout().lock();
    let (outcome, _) = loxlex::tokenize(source, &mut out, sink, &config)
        .context("writing token stream")?;

    info!(?outcome, "done");
    Ok(ExitCode::from(outcome.exit_code()))
}
