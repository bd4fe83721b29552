//! oneof CLI

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use oneof::error::report_error;
use oneof::{CheckConfig, Checker, CompileError};

/// Environment variable holding the log filter
const LOG_ENV: &str = "ONEOF_LOG";

#[derive(Parser)]
#[command(name = "oneof", version, about = "Closed-union coverage checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every check in a source file
    Check {
        /// Source file to check
        file: PathBuf,
        /// Configuration file (default: oneof.toml next to the source)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Log engine decisions to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Parse and dump AST as JSON (debug)
    Parse {
        /// Source file to parse
        file: PathBuf,
    },
    /// Tokenize and dump tokens (debug)
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Command::Check { verbose: true, .. });
    init_logging(verbose);

    let ok = match cli.command {
        Command::Check { file, config, .. } => check_file(&file, config.as_deref()),
        Command::Parse { file } => parse_file(&file),
        Command::Tokens { file } => tokenize_file(&file),
    };

    if !ok {
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) if verbose => EnvFilter::new("oneof=debug"),
        Err(_) => EnvFilter::new("warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Read a source file, reporting failures the same way as compile errors
fn read_source(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(source) => Some(source),
        Err(e) => {
            eprintln!("Error: {}: {e}", path.display());
            None
        }
    }
}

fn report(filename: &str, source: &str, error: &CompileError) {
    if let Err(e) = report_error(filename, source, error) {
        eprintln!("Error: {error} ({e})");
    }
}

fn check_file(path: &Path, config: Option<&Path>) -> bool {
    let Some(source) = read_source(path) else {
        return false;
    };
    let filename = path.display().to_string();

    let result = CheckConfig::discover(config, path).and_then(|config| {
        let tokens = oneof::lexer::tokenize(&source)?;
        let ast = oneof::parser::parse(&filename, &source, tokens)?;
        Checker::new(config).check_program(&ast)
    });

    match result {
        Ok(()) => {
            println!("✓ {filename} checks successfully");
            true
        }
        Err(e) => {
            report(&filename, &source, &e);
            let count = e.diagnostics().len();
            if count > 0 {
                eprintln!("✗ {filename}: {count} unresolved diagnostic(s)");
            }
            false
        }
    }
}

fn parse_file(path: &Path) -> bool {
    let Some(source) = read_source(path) else {
        return false;
    };
    let filename = path.display().to_string();

    let result = oneof::lexer::tokenize(&source)
        .and_then(|tokens| oneof::parser::parse(&filename, &source, tokens));
    match result {
        Ok(ast) => match serde_json::to_string_pretty(&ast) {
            Ok(json) => {
                println!("{json}");
                true
            }
            Err(e) => {
                eprintln!("Error: {e}");
                false
            }
        },
        Err(e) => {
            report(&filename, &source, &e);
            false
        }
    }
}

fn tokenize_file(path: &Path) -> bool {
    let Some(source) = read_source(path) else {
        return false;
    };
    let filename = path.display().to_string();

    match oneof::lexer::tokenize(&source) {
        Ok(tokens) => {
            for (tok, span) in &tokens {
                println!("{:?} @ {}..{}", tok, span.start, span.end);
            }
            true
        }
        Err(e) => {
            report(&filename, &source, &e);
            false
        }
    }
}
