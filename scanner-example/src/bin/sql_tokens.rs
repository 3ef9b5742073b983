//! Prints the tokens of a SQL script.
//!
//! Usage: sql-tokens [--strategy=interpreted|compiled] [--flat-comments] [--trivia] [file]
//!
//! Reads standard input when no file is given. Set `RUST_LOG=scanner_framework=trace`
//! to watch the scanners work.

use std::io::Read;
use std::process::ExitCode;

use scanner_example::{tokenize, Options, SqlToken};
use scanner_framework::LexToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn print_usage() {
    eprintln!("Usage: sql-tokens [options] [file]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --strategy=<name>   interpreted (default) or compiled");
    eprintln!("  --flat-comments     Reject nested /* */ comments");
    eprintln!("  --trivia            Also print whitespace and comments");
    eprintln!("  -h, --help          Show this help");
}

fn main() -> ExitCode {
    init_tracing();

    let mut options = Options::default();
    let mut show_trivia = false;
    let mut file_path = None;

    for arg in std::env::args().skip(1) {
        if let Some(name) = arg.strip_prefix("--strategy=") {
            match name.parse() {
                Ok(strategy) => options.strategy = strategy,
                Err(err) => {
                    eprintln!("error: {err}");
                    return ExitCode::FAILURE;
                }
            }
        } else if arg == "--flat-comments" {
            options.flat_comments = true;
        } else if arg == "--trivia" {
            show_trivia = true;
        } else if arg == "-h" || arg == "--help" {
            print_usage();
            return ExitCode::SUCCESS;
        } else if arg.starts_with('-') {
            eprintln!("error: unknown option `{arg}`");
            print_usage();
            return ExitCode::FAILURE;
        } else if file_path.is_none() {
            file_path = Some(arg);
        }
    }

    let source = match &file_path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
        }
    };
    let source = match source {
        Ok(source) => source,
        Err(err) => {
            let name = file_path.as_deref().unwrap_or("<stdin>");
            eprintln!("error: cannot read {name}: {err}");
            return ExitCode::FAILURE;
        }
    };

    match tokenize(&source, options) {
        Ok(result) => {
            result
                .tokens
                .iter()
                .filter(|token| show_trivia || !token.is_trivia())
                .for_each(|token: &SqlToken| println!("{token}"));

            if let Some(position) = result.stuck_at {
                eprintln!("error: unexpected character at {position}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
