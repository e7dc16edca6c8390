//! Backtracking parser combinators over an [`Input`].
//!
//! A parser is anything implementing [`Parser`]: given the input and a start
//! position it either succeeds with a value and the position after it, or
//! fails with a [`ParseFailure`]. A failure carries no position to resume
//! from, so the caller is always left where the attempt began.

use std::rc::Rc;

use crate::error::ParseFailure;
use crate::input::{Input, Position};

pub type ParseResult<T> = Result<(T, Position), ParseFailure>;

pub trait Parser {
    type Output;

    fn parse(&self, input: &Input, position: Position) -> ParseResult<Self::Output>;
}

// Allow closures to be parsers
impl<T, F> Parser for F
where
    F: Fn(&Input, Position) -> ParseResult<T>,
{
    type Output = T;

    fn parse(&self, input: &Input, position: Position) -> ParseResult<T> {
        self(input, position)
    }
}

// === Boxed Parser for type erasure ===

pub struct BoxedParser<'g, T> {
    parser: Rc<dyn Fn(&Input, Position) -> ParseResult<T> + 'g>,
}

impl<T> Clone for BoxedParser<'_, T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<'g, T: 'g> BoxedParser<'g, T> {
    pub fn new<P: Parser<Output = T> + 'g>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |input: &Input, position: Position| {
                parser.parse(input, position)
            }),
        }
    }

    pub fn map<U: 'g, F: Fn(T) -> U + 'g>(self, f: F) -> BoxedParser<'g, U> {
        BoxedParser::new(map(self, f))
    }
}

impl<T> Parser for BoxedParser<'_, T> {
    type Output = T;

    fn parse(&self, input: &Input, position: Position) -> ParseResult<T> {
        (self.parser)(input, position)
    }
}

// === Choice ===

/// A tuple of parsers with a common output, tried in order.
pub trait Alternatives {
    type Output;

    fn first_match(&self, input: &Input, position: Position) -> ParseResult<Self::Output>;
}

macro_rules! alternatives_impl {
    ($first_index:tt => $first:ident $(, $index:tt => $parser:ident)*) => {
        impl<T, $first $(, $parser)*> Alternatives for ($first, $($parser,)*)
        where
            $first: Parser<Output = T>,
            $($parser: Parser<Output = T>,)*
        {
            type Output = T;

            fn first_match(&self, input: &Input, position: Position) -> ParseResult<T> {
                let failure = match self.$first_index.parse(input, position) {
                    Ok(parsed) => return Ok(parsed),
                    Err(failure) => failure,
                };
                $(
                    let failure = match self.$index.parse(input, position) {
                        Ok(parsed) => return Ok(parsed),
                        Err(other) => failure.further(other),
                    };
                )*
                Err(failure.context(position, "no alternative matched"))
            }
        }
    };
}

alternatives_impl!(0 => A);
alternatives_impl!(0 => A, 1 => B);
alternatives_impl!(0 => A, 1 => B, 2 => C);
alternatives_impl!(0 => A, 1 => B, 2 => C, 3 => D);
alternatives_impl!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E);

/// Try each alternative at the same position and return the first success.
///
/// When every alternative fails, the failure that got furthest into the
/// input is reported (the earliest alternative wins a tie), extended with a
/// "no alternative matched" fragment at `position`.
pub fn choice<A: Alternatives>(alternatives: A) -> impl Parser<Output = A::Output> {
    move |input: &Input, position: Position| alternatives.first_match(input, position)
}

// === Sequence ===

/// A tuple of parsers run back-to-back.
pub trait Sequence {
    type Output;

    fn run(&self, input: &Input, position: Position) -> ParseResult<Self::Output>;
}

macro_rules! sequence_impl {
    ($($index:tt => $parser:ident : $value:ident),+) => {
        impl<$($parser: Parser),+> Sequence for ($($parser,)+) {
            type Output = ($($parser::Output,)+);

            fn run(&self, input: &Input, position: Position) -> ParseResult<Self::Output> {
                let next = position;
                $(
                    let ($value, next) = self.$index.parse(input, next)?;
                )+
                Ok((($($value,)+), next))
            }
        }
    };
}

sequence_impl!(0 => A: a);
sequence_impl!(0 => A: a, 1 => B: b);
sequence_impl!(0 => A: a, 1 => B: b, 2 => C: c);
sequence_impl!(0 => A: a, 1 => B: b, 2 => C: c, 3 => D: d);
sequence_impl!(0 => A: a, 1 => B: b, 2 => C: c, 3 => D: d, 4 => E: e);

/// Run every parser in order, threading the position; the first failure
/// aborts the whole sequence.
pub fn sequence<S: Sequence>(parsers: S) -> impl Parser<Output = S::Output> {
    move |input: &Input, position: Position| parsers.run(input, position)
}

// === Repetition ===

/// Parse zero or more occurrences. Never fails.
///
/// Stops at the first failure, or after a success that consumed nothing.
pub fn repeat<P: Parser>(parser: P) -> impl Parser<Output = Vec<P::Output>> {
    move |input: &Input, position: Position| {
        let mut values = Vec::new();
        let mut next = position;
        while let Ok((value, after)) = parser.parse(input, next) {
            values.push(value);
            if after == next {
                break;
            }
            next = after;
        }
        Ok((values, next))
    }
}

// === Recursion and mapping ===

/// Build the parser from `producer` only when it is invoked, so a rule can
/// refer to itself without being constructed infinitely.
pub fn recursive<P, F>(producer: F) -> impl Parser<Output = P::Output>
where
    P: Parser,
    F: Fn() -> P,
{
    move |input: &Input, position: Position| producer().parse(input, position)
}

pub fn map<P, U, F>(parser: P, f: F) -> impl Parser<Output = U>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    move |input: &Input, position: Position| {
        parser
            .parse(input, position)
            .map(|(value, next)| (f(value), next))
    }
}
