//! Step-by-step tracing of parsing and reduction.
//!
//! A [`Tracer`] is handed to the grammar and to the reducer when they are
//! built. Every method has an empty default, so [`NoopTracer`] costs nothing
//! and a custom tracer only overrides what it cares about.

use std::fmt;

use crate::ast::Term;
use crate::error::ParseFailure;
use crate::input::Position;

pub trait Tracer {
    /// A grammar rule matched; `position` is where parsing continues.
    fn matched(&self, _rule: &'static str, _position: Position, _value: &dyn fmt::Display) {}

    /// A grammar rule attempted at `position` failed.
    fn failed(&self, _rule: &'static str, _position: Position, _failure: &ParseFailure) {}

    /// Reduction pass number `step` produced `term`.
    fn reduced(&self, _step: usize, _term: &Term) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Forwards every event to the `log` facade at trace level.
///
/// Parse events use the `lambda::parse` target and reduction events use
/// `lambda::reduce`, so they can be enabled independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn matched(&self, rule: &'static str, position: Position, value: &dyn fmt::Display) {
        log::trace!(target: "lambda::parse", "{position}: {rule} parsed: {value}");
    }

    fn failed(&self, rule: &'static str, position: Position, failure: &ParseFailure) {
        log::trace!(
            target: "lambda::parse",
            "{position}: {rule} failed (innermost at {})",
            failure.position()
        );
    }

    fn reduced(&self, step: usize, term: &Term) {
        log::trace!(target: "lambda::reduce", "step {step}: {term}");
    }
}
