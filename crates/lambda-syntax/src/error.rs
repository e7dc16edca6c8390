use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::input::Position;

const TAG: &str = "lambda";

/// A parse failure and the trail of rules it propagated through.
///
/// The message is a newline-joined list of `lambda:<position>: <text>`
/// fragments. The innermost failure comes first; each enclosing rule that
/// re-raises the failure appends its own fragment at the end. `position`
/// always refers to the innermost fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(lambda::syntax::parse_failure),
    help("terms are built from letters, `\\`, `.`, `(` and `)`")
)]
pub struct ParseFailure {
    position: Position,
    message: String,
}

impl ParseFailure {
    pub fn new(position: Position, text: impl fmt::Display) -> Self {
        Self {
            position,
            message: fragment(position, text),
        }
    }

    /// Position where the failure was first detected.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Derive a failure with one more fragment, reported by an enclosing rule
    /// that started at `position`.
    pub fn context(self, position: Position, text: impl fmt::Display) -> Self {
        Self {
            position: self.position,
            message: format!("{}\n{}", self.message, fragment(position, text)),
        }
    }

    /// Keep whichever failure got further into the input. Ties keep `self`.
    pub fn further(self, other: Self) -> Self {
        if other.position > self.position {
            other
        } else {
            self
        }
    }
}

fn fragment(position: Position, text: impl fmt::Display) -> String {
    format!("{TAG}:{position}: {text}")
}
