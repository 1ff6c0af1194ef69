//! Binary entry point for the tugdoc CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Print a Google-style docstring for the function at line 10
//! tugdoc generate --at src/lib.py:10:5
//!
//! # Same, wrapped in a JSON response
//! tugdoc generate --at src/lib.py:10:5 --format json
//!
//! # Inspect what was extracted
//! tugdoc facts --at src/lib.py:10:5
//!
//! # List styles
//! tugdoc styles
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use tugdoc::cli::{run_facts, run_generate, run_styles, GenerateOptions, OutputFormat};
use tugdoc_core::error::{DocError, OutputErrorCode};
use tugdoc_core::output::{emit_response, ErrorResponse};
use tugdoc_core::style::DEFAULT_STYLE;

// ============================================================================
// CLI Structure
// ============================================================================

/// Docstring synthesis for Python.
///
/// Generates Google-style docstrings from function signatures, bodies and
/// class or module assignments, keeping any text already written.
#[derive(Parser, Debug)]
#[command(name = "tugdoc", version, about = "Docstring synthesis for Python")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a docstring for the definition at a location.
    ///
    /// The position may fall anywhere inside a `def` or `class` (decorators
    /// included); elsewhere the module docstring is generated.
    Generate {
        /// Location in "file:line:col" format (1-indexed).
        #[arg(long)]
        at: String,
        /// Docstring style.
        #[arg(long, default_value = DEFAULT_STYLE)]
        style: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the facts extracted for the definition at a location.
    Facts {
        /// Location in "file:line:col" format (1-indexed).
        #[arg(long)]
        at: String,
    },
    /// List the available docstring styles.
    Styles,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON, same as results
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();

            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<(), DocError> {
    let output = match cli.command {
        Command::Generate { at, style, format } => {
            run_generate(&at, &GenerateOptions { style, format })?
        }
        Command::Facts { at } => run_facts(&at)?,
        Command::Styles => run_styles()?,
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod cli_parsing {
        use super::*;

        #[test]
        fn generate_defaults() {
            let cli = Cli::try_parse_from(["tugdoc", "generate", "--at", "a.py:3:1"]).unwrap();
            match cli.command {
                Command::Generate { at, style, format } => {
                    assert_eq!(at, "a.py:3:1");
                    assert_eq!(style, "google");
                    assert_eq!(format, OutputFormat::Text);
                }
                _ => panic!("expected Generate"),
            }
            assert!(matches!(cli.global.log_level, LogLevel::Warn));
        }

        #[test]
        fn generate_json_with_style() {
            let args = [
                "tugdoc",
                "generate",
                "--at",
                "a.py:3:1",
                "--style",
                "Google",
                "--format",
                "json",
            ];
            let cli = Cli::try_parse_from(args).unwrap();
            match cli.command {
                Command::Generate { style, format, .. } => {
                    assert_eq!(style, "Google");
                    assert_eq!(format, OutputFormat::Json);
                }
                _ => panic!("expected Generate"),
            }
        }

        #[test]
        fn generate_requires_at() {
            assert!(Cli::try_parse_from(["tugdoc", "generate"]).is_err());
        }

        #[test]
        fn unknown_format_is_rejected() {
            let args = ["tugdoc", "generate", "--at", "a.py:1:1", "--format", "xml"];
            assert!(Cli::try_parse_from(args).is_err());
        }

        #[test]
        fn global_log_level_after_subcommand() {
            let cli = Cli::try_parse_from(["tugdoc", "styles", "--log-level", "debug"]).unwrap();
            assert!(matches!(cli.command, Command::Styles));
            assert!(matches!(cli.global.log_level, LogLevel::Debug));
        }

        #[test]
        fn facts_command() {
            let cli = Cli::try_parse_from(["tugdoc", "facts", "--at", "m.py:1:1"]).unwrap();
            assert!(matches!(cli.command, Command::Facts { at } if at == "m.py:1:1"));
        }
    }

    #[test]
    fn log_levels_map_to_tracing() {
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
    }
}
