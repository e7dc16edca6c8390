//! Grammar for the untyped lambda calculus, built from the combinators.
//!
//! Lexical rules:
//! - `blanks`: `(' ' | '\t' | '\n')*`
//! - `letter`: one character from the Unicode `L*` general categories
//! - `identifier`: blanks letter letter*
//! - `punctuation`: blanks followed by one of `\` `.` `(` `)`
//!
//! Structural rules, where the first matching alternative wins:
//! - `expression := term | "(" expression ")"`
//! - `term := function_application | variable | lambda_abstraction`
//! - `function_application := atom atom atom*`
//! - `atom := variable | lambda_abstraction | "(" expression ")"`
//! - `top_expression := expression blanks`, consuming the whole input

use std::fmt;
use std::iter;
use std::rc::Rc;

use unicode_general_category::{get_general_category, GeneralCategory};

use crate::ast::Term;
use crate::combinators::{choice, map, recursive, repeat, sequence, BoxedParser, ParseResult, Parser};
use crate::error::ParseFailure;
use crate::input::{Input, Position};
use crate::trace::Tracer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Backslash,
    Dot,
    LeftParen,
    RightParen,
}

impl Punctuation {
    pub fn as_str(self) -> &'static str {
        match self {
            Punctuation::Backslash => "\\",
            Punctuation::Dot => ".",
            Punctuation::LeftParen => "(",
            Punctuation::RightParen => ")",
        }
    }
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership in the Unicode `L*` general-category group.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// The rule set. Every named rule reports its attempts to the tracer.
#[derive(Clone, Copy)]
pub struct Grammar<'t> {
    tracer: &'t dyn Tracer,
}

impl<'t> Grammar<'t> {
    pub fn new(tracer: &'t dyn Tracer) -> Self {
        Self { tracer }
    }

    /// Wrap `parser` as a named rule: report the outcome to the tracer and,
    /// on failure, append what the rule expected.
    fn rule<P>(
        self,
        name: &'static str,
        expected: Option<&'static str>,
        parser: P,
    ) -> BoxedParser<'t, P::Output>
    where
        P: Parser + 't,
        P::Output: fmt::Display + 't,
    {
        let tracer = self.tracer;
        BoxedParser::new(move |input: &Input, position: Position| {
            match parser.parse(input, position) {
                Ok((value, next)) => {
                    tracer.matched(name, next, &value);
                    Ok((value, next))
                }
                Err(failure) => {
                    let failure = match expected {
                        Some(text) => failure.context(position, text),
                        None => failure,
                    };
                    tracer.failed(name, position, &failure);
                    Err(failure)
                }
            }
        })
    }

    // === Lexical rules ===

    pub fn blanks(self) -> BoxedParser<'t, ()> {
        BoxedParser::new(|input: &Input, position: Position| -> ParseResult<()> {
            let mut next = position;
            while matches!(input.char_at(next), Some(' ' | '\t' | '\n')) {
                next += 1;
            }
            Ok(((), next))
        })
    }

    pub fn letter(self) -> BoxedParser<'t, char> {
        BoxedParser::new(|input: &Input, position: Position| -> ParseResult<char> {
            match input.char_at(position) {
                Some(c) if is_letter(c) => Ok((c, position + 1)),
                _ => Err(ParseFailure::new(position, "a letter is expected")),
            }
        })
    }

    pub fn identifier(self) -> BoxedParser<'t, String> {
        let letter = self.letter();
        let letters = sequence((self.blanks(), letter.clone(), repeat(letter)));
        let name = map(letters, |((), first, rest)| {
            iter::once(first).chain(rest).collect::<String>()
        });
        self.rule("identifier", Some("an identifier is expected"), name)
    }

    pub fn punctuation(self, mark: Punctuation) -> BoxedParser<'t, Punctuation> {
        let blanks = self.blanks();
        let parser = move |input: &Input, position: Position| -> ParseResult<Punctuation> {
            let ((), start) = blanks.parse(input, position)?;
            if input.starts_with(start, mark.as_str()) {
                Ok((mark, start + mark.as_str().chars().count()))
            } else {
                Err(ParseFailure::new(
                    start,
                    format!("a punctuation `{mark}` is expected"),
                ))
            }
        };
        self.rule("punctuation", None, parser)
    }

    // === Structural rules ===

    pub fn top_expression(self) -> BoxedParser<'t, Rc<Term>> {
        let parser = sequence((self.expression(), self.blanks()));
        let tracer = self.tracer;
        BoxedParser::new(move |input: &Input, position: Position| {
            match parser.parse(input, position) {
                Ok(((term, ()), next)) if next == input.len() => {
                    tracer.matched("top expression", next, &term);
                    Ok((term, next))
                }
                Ok((_, next)) => {
                    let failure = ParseFailure::new(
                        next,
                        format!("extra characters are detected at position {next}"),
                    );
                    tracer.failed("top expression", position, &failure);
                    Err(failure)
                }
                Err(failure) => {
                    tracer.failed("top expression", position, &failure);
                    Err(failure)
                }
            }
        })
    }

    pub fn expression(self) -> BoxedParser<'t, Rc<Term>> {
        let nested = self.bracketed(recursive(move || self.expression()));
        self.rule(
            "expression",
            Some("an expression is expected"),
            choice((self.term(), nested)),
        )
    }

    /// Application comes first: it starts like the other two alternatives and
    /// has to claim runs of several atoms before they match a single one.
    pub fn term(self) -> BoxedParser<'t, Rc<Term>> {
        let alternatives = choice((
            self.function_application(),
            self.variable(),
            self.lambda_abstraction(),
        ));
        self.rule("term", Some("a term is expected"), alternatives)
    }

    pub fn variable(self) -> BoxedParser<'t, Rc<Term>> {
        let parser = self.identifier().map(Term::variable);
        self.rule("variable", Some("a variable is expected"), parser)
    }

    pub fn lambda_abstraction(self) -> BoxedParser<'t, Rc<Term>> {
        let parser = sequence((
            self.punctuation(Punctuation::Backslash),
            self.identifier(),
            self.punctuation(Punctuation::Dot),
            recursive(move || self.expression()),
        ));
        let abstraction = map(parser, |(_, argument, _, body)| {
            Term::abstraction(argument, body)
        });
        self.rule(
            "lambda abstraction",
            Some("a lambda abstraction is expected"),
            abstraction,
        )
    }

    /// Two or more atoms, folded to the left: `a b c` is `(a b) c`.
    pub fn function_application(self) -> BoxedParser<'t, Rc<Term>> {
        let atom = self.atom();
        let parser = sequence((atom.clone(), atom.clone(), repeat(atom)));
        let application = map(parser, |(function, argument, rest)| {
            rest.into_iter()
                .fold(Term::application(function, argument), Term::application)
        });
        self.rule(
            "function application",
            Some("function applications are expected"),
            application,
        )
    }

    fn atom(self) -> BoxedParser<'t, Rc<Term>> {
        BoxedParser::new(choice((
            self.variable(),
            self.lambda_abstraction(),
            self.bracketed(recursive(move || self.expression())),
        )))
    }

    fn bracketed<P>(self, inner: P) -> BoxedParser<'t, P::Output>
    where
        P: Parser + 't,
        P::Output: fmt::Display + 't,
    {
        let parser = sequence((
            self.punctuation(Punctuation::LeftParen),
            inner,
            self.punctuation(Punctuation::RightParen),
        ));
        self.rule("bracketed", None, map(parser, |(_, value, _)| value))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fmt;

    use super::*;
    use crate::trace::NoopTracer;

    fn run<P: Parser>(parser: P, source: &str) -> ParseResult<P::Output> {
        parser.parse(&Input::new(source), 0)
    }

    #[derive(Default)]
    struct RecordingTracer {
        events: RefCell<Vec<String>>,
    }

    impl Tracer for RecordingTracer {
        fn matched(&self, rule: &'static str, position: Position, value: &dyn fmt::Display) {
            self.events
                .borrow_mut()
                .push(format!("matched {rule} at {position}: {value}"));
        }

        fn failed(&self, rule: &'static str, position: Position, _failure: &ParseFailure) {
            self.events
                .borrow_mut()
                .push(format!("failed {rule} at {position}"));
        }
    }

    #[test]
    fn test_blanks_always_succeed() {
        let grammar = Grammar::new(&NoopTracer);
        assert_eq!(run(grammar.blanks(), " \t\nx"), Ok(((), 3)));
        assert_eq!(run(grammar.blanks(), "x"), Ok(((), 0)));
        assert_eq!(run(grammar.blanks(), ""), Ok(((), 0)));
    }

    #[test]
    fn test_letter_accepts_unicode_letters() {
        let grammar = Grammar::new(&NoopTracer);
        assert_eq!(run(grammar.letter(), "λ"), Ok(('λ', 1)));

        assert_eq!(run(grammar.letter(), "ǅ"), Ok(('ǅ', 1)));
        assert_eq!(run(grammar.letter(), "ʰ"), Ok(('ʰ', 1)));
        assert_eq!(run(grammar.letter(), "字"), Ok(('字', 1)));

        let failure = run(grammar.letter(), "1").unwrap_err();
        assert_eq!(failure.message(), "lambda:0: a letter is expected");
    }

    #[test]
    fn test_letter_rejects_alphabetic_non_letters() {
        let grammar = Grammar::new(&NoopTracer);
        // letter number, circled symbol, spacing vowel sign
        for source in ["Ⅻ", "Ⓐ", "\u{93e}"] {
            let failure = run(grammar.letter(), source).unwrap_err();
            assert_eq!(failure.message(), "lambda:0: a letter is expected", "{source}");
        }
    }

    #[test]
    fn test_identifier_stops_before_vowel_sign() {
        let grammar = Grammar::new(&NoopTracer);
        assert_eq!(run(grammar.identifier(), "aा"), Ok(("a".to_string(), 1)));
    }

    #[test]
    fn test_identifier_skips_blanks_and_collects_letters() {
        let grammar = Grammar::new(&NoopTracer);
        assert_eq!(
            run(grammar.identifier(), "  abc d"),
            Ok(("abc".to_string(), 5))
        );
    }

    #[test]
    fn test_identifier_failure_points_past_blanks() {
        let grammar = Grammar::new(&NoopTracer);
        let failure = run(grammar.identifier(), "  1").unwrap_err();

        assert_eq!(failure.position(), 2);
        assert_eq!(
            failure.message(),
            "lambda:2: a letter is expected\nlambda:0: an identifier is expected"
        );
    }

    #[test]
    fn test_punctuation() {
        let grammar = Grammar::new(&NoopTracer);
        assert_eq!(
            run(grammar.punctuation(Punctuation::Dot), "  ."),
            Ok((Punctuation::Dot, 3))
        );

        let failure = run(grammar.punctuation(Punctuation::Dot), "x").unwrap_err();
        assert_eq!(failure.message(), "lambda:0: a punctuation `.` is expected");
    }

    #[test]
    fn test_lambda_abstraction() {
        let grammar = Grammar::new(&NoopTracer);
        let (term, next) = run(grammar.lambda_abstraction(), "\\x.x").unwrap();

        assert_eq!(next, 4);
        assert_eq!(term, Term::abstraction("x", Term::variable("x")));
    }

    #[test]
    fn test_lambda_body_extends_as_far_as_possible() {
        let grammar = Grammar::new(&NoopTracer);
        let (term, _) = run(grammar.top_expression(), "\\x.x y").unwrap();

        let body = Term::application(Term::variable("x"), Term::variable("y"));
        assert_eq!(term, Term::abstraction("x", body));
    }

    #[test]
    fn test_function_application_folds_left() {
        let grammar = Grammar::new(&NoopTracer);
        let (term, next) = run(grammar.function_application(), "f a b c").unwrap();

        let f_a = Term::application(Term::variable("f"), Term::variable("a"));
        let f_a_b = Term::application(f_a, Term::variable("b"));
        assert_eq!(next, 7);
        assert_eq!(term, Term::application(f_a_b, Term::variable("c")));
    }

    #[test]
    fn test_function_application_needs_two_atoms() {
        let grammar = Grammar::new(&NoopTracer);
        let failure = run(grammar.function_application(), "f").unwrap_err();
        assert_eq!(failure.position(), 1);
    }

    #[test]
    fn test_bracketed_expression() {
        let grammar = Grammar::new(&NoopTracer);
        let (term, next) = run(grammar.expression(), "( (a) )").unwrap();

        assert_eq!(next, 7);
        assert_eq!(term, Term::variable("a"));
    }

    #[test]
    fn test_bracketed_atoms_in_application() {
        let grammar = Grammar::new(&NoopTracer);
        let (term, _) = run(grammar.top_expression(), "(\\x.x) (a b)").unwrap();

        let identity = Term::abstraction("x", Term::variable("x"));
        let a_b = Term::application(Term::variable("a"), Term::variable("b"));
        assert_eq!(term, Term::application(identity, a_b));
    }

    #[test]
    fn test_top_expression_rejects_leftovers() {
        let grammar = Grammar::new(&NoopTracer);
        let failure = run(grammar.top_expression(), "a )").unwrap_err();

        assert_eq!(failure.position(), 2);
        assert_eq!(
            failure.message(),
            "lambda:2: extra characters are detected at position 2"
        );
    }

    #[test]
    fn test_top_expression_allows_trailing_blanks() {
        let grammar = Grammar::new(&NoopTracer);
        assert_eq!(
            run(grammar.top_expression(), " x \n"),
            Ok((Term::variable("x"), 4))
        );
    }

    #[test]
    fn test_missing_dot_is_reported_where_it_was_expected() {
        let grammar = Grammar::new(&NoopTracer);
        let failure = run(grammar.top_expression(), "\\x x").unwrap_err();

        assert_eq!(failure.position(), 3);
        assert!(failure
            .message()
            .starts_with("lambda:3: a punctuation `.` is expected\n"));
        assert!(failure
            .message()
            .ends_with("lambda:0: an expression is expected"));
    }

    #[test]
    fn test_rules_report_to_tracer() {
        let tracer = RecordingTracer::default();
        let grammar = Grammar::new(&tracer);
        run(grammar.top_expression(), "x").unwrap();

        let events = tracer.events.borrow();
        assert!(events.contains(&"failed function application at 0".to_string()));
        assert!(events.contains(&"matched identifier at 1: x".to_string()));
        assert_eq!(
            events[events.len() - 3..],
            [
                "matched term at 1: x".to_string(),
                "matched expression at 1: x".to_string(),
                "matched top expression at 1: x".to_string(),
            ]
        );
    }
}
