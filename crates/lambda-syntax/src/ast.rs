use std::fmt;
use std::rc::Rc;

/// A lambda calculus term.
///
/// Terms are immutable and shared through `Rc`; reduction builds new nodes
/// around unchanged subtrees instead of editing them in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A reference to a bound or free name.
    Variable { name: String },
    /// `\argument.body`
    Abstraction { argument: String, body: Rc<Term> },
    /// `function argument`
    Application { function: Rc<Term>, argument: Rc<Term> },
}

impl Term {
    pub fn variable(name: impl Into<String>) -> Rc<Term> {
        Rc::new(Term::Variable { name: name.into() })
    }

    pub fn abstraction(argument: impl Into<String>, body: Rc<Term>) -> Rc<Term> {
        Rc::new(Term::Abstraction {
            argument: argument.into(),
            body,
        })
    }

    pub fn application(function: Rc<Term>, argument: Rc<Term>) -> Rc<Term> {
        Rc::new(Term::Application { function, argument })
    }
}

impl fmt::Display for Term {
    /// Canonical form. Parenthesises only where re-reading would otherwise
    /// build a different tree: an abstraction in function position, and an
    /// abstraction or application in argument position.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable { name } => f.write_str(name),
            Term::Abstraction { argument, body } => write!(f, "\\{argument}.{body}"),
            Term::Application { function, argument } => {
                if let Term::Abstraction { .. } = function.as_ref() {
                    write!(f, "({function})")?;
                } else {
                    write!(f, "{function}")?;
                }

                if let Term::Variable { .. } = argument.as_ref() {
                    write!(f, " {argument}")
                } else {
                    write!(f, " ({argument})")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Term;

    #[test]
    fn test_display_variable_and_abstraction() {
        let identity = Term::abstraction("x", Term::variable("x"));
        assert_eq!(identity.to_string(), "\\x.x");

        let constant = Term::abstraction("x", Term::abstraction("y", Term::variable("x")));
        assert_eq!(constant.to_string(), "\\x.\\y.x");
    }

    #[test]
    fn test_display_application_is_left_associative() {
        let f_a = Term::application(Term::variable("f"), Term::variable("a"));
        let f_a_b = Term::application(f_a, Term::variable("b"));
        assert_eq!(f_a_b.to_string(), "f a b");

        let nested = Term::application(
            Term::variable("f"),
            Term::application(Term::variable("a"), Term::variable("b")),
        );
        assert_eq!(nested.to_string(), "f (a b)");
    }

    #[test]
    fn test_display_parenthesises_abstractions() {
        let identity = Term::abstraction("x", Term::variable("x"));
        let applied = Term::application(identity.clone(), Term::variable("y"));
        assert_eq!(applied.to_string(), "(\\x.x) y");

        let passed = Term::application(
            Term::application(Term::variable("g"), identity),
            Term::variable("a"),
        );
        assert_eq!(passed.to_string(), "g (\\x.x) a");
    }

    #[test]
    fn test_abstraction_body_is_not_parenthesised() {
        let body = Term::application(Term::variable("x"), Term::variable("y"));
        assert_eq!(Term::abstraction("x", body).to_string(), "\\x.x y");
    }
}
