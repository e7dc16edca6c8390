//! Call-by-name reduction of lambda terms.
//!
//! [`evaluate`] performs a single pass over a term; [`Reducer`] repeats
//! passes until the term reaches a normal form.

use std::rc::Rc;

use lambda_syntax::Term;

mod env;
mod evaluate;
mod reducer;

pub use env::Environment;
pub use evaluate::evaluate;
pub use reducer::{Halt, ReduceConfig, Reducer, Reduction};

/// Reduce `term` to normal form without tracing or a step limit.
pub fn normalize(term: Rc<Term>) -> Rc<Term> {
    Reducer::default().normalize(term).term
}
