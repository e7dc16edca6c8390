use std::path::PathBuf;

use lambda_syntax::{Input, ParseFailure};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// CLI-specific error type that provides rich diagnostics
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Failed to parse {name}")]
    #[diagnostic(code(lambda::cli::parse_error))]
    ParseError {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        name: String,
        message: String,
        #[source]
        source: ParseFailure,
    },

    #[error("Failed to read file {path}")]
    #[diagnostic(code(lambda::cli::io_error))]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read standard input")]
    #[diagnostic(code(lambda::cli::stdin_error))]
    StdinError {
        #[source]
        source: std::io::Error,
    },
}

/// Helper struct to provide context for error conversion
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    pub name: &'a str,
    pub source: &'a str,
}

/// Convert a parse failure into a labelled diagnostic pointing at the
/// character where it was detected.
pub fn convert_parse_error(error: ParseFailure, ctx: ErrorContext) -> CliError {
    let input = Input::new(ctx.source);
    let start = input.byte_offset(error.position());
    let end = input.byte_offset(error.position() + 1);
    // innermost fragment, without its `lambda:<position>: ` prefix
    let message = error
        .message()
        .lines()
        .next()
        .and_then(|line| line.split_once(": "))
        .map(|(_, text)| text.to_string())
        .unwrap_or_default();

    CliError::ParseError {
        src: NamedSource::new(ctx.name, ctx.source.to_string()),
        span: (start, end - start).into(),
        name: ctx.name.to_string(),
        message,
        source: error,
    }
}

/// Convert IO errors with context
pub fn convert_io_error(error: std::io::Error, path: PathBuf) -> CliError {
    CliError::IoError {
        path,
        source: error,
    }
}
