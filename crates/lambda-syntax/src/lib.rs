//! Surface syntax of the untyped lambda calculus.
//!
//! ```text
//! expression := term | "(" expression ")"
//! term       := application | variable | "\" identifier "." expression
//! ```
//!
//! [`LambdaParser`] turns a source string into a shared [`Term`] tree, and
//! [`Term`]'s `Display` impl prints the canonical form that reads back to
//! the same tree.

use std::rc::Rc;

pub mod ast;
pub mod combinators;
pub mod error;
pub mod grammar;
pub mod input;
pub mod trace;

pub use ast::Term;
pub use combinators::{BoxedParser, ParseResult, Parser};
pub use error::ParseFailure;
pub use grammar::{Grammar, Punctuation};
pub use input::{Input, Position};
pub use trace::{LogTracer, NoopTracer, Tracer};

pub struct LambdaParser<'t> {
    grammar: Grammar<'t>,
}

impl<'t> LambdaParser<'t> {
    pub fn new(tracer: &'t dyn Tracer) -> Self {
        Self {
            grammar: Grammar::new(tracer),
        }
    }

    /// Parse a whole source text. Blanks around the term are allowed, anything
    /// else left over is an error.
    pub fn parse(&self, source: &str) -> Result<Rc<Term>, ParseFailure> {
        let input = Input::new(source);
        let (term, _) = self.grammar.top_expression().parse(&input, 0)?;
        Ok(term)
    }
}

impl Default for LambdaParser<'static> {
    fn default() -> Self {
        Self::new(&NoopTracer)
    }
}

/// Parse `source` without tracing.
pub fn parse(source: &str) -> Result<Rc<Term>, ParseFailure> {
    LambdaParser::default().parse(source)
}
