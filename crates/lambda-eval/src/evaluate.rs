use std::rc::Rc;

use lambda_syntax::Term;

use crate::env::Environment;

/// One evaluation pass over `term`.
///
/// An application whose function is literally an abstraction is reduced by
/// binding the parameter to the argument as written (call by name) and
/// evaluating the body. Every other node is rebuilt from its evaluated
/// children; a variable with no binding stays as it is. Bound names are never
/// renamed, so an argument with free variables can be captured by an inner
/// abstraction.
pub fn evaluate(term: &Rc<Term>, env: &Environment) -> Rc<Term> {
    match term.as_ref() {
        Term::Variable { name } => env.lookup(name).cloned().unwrap_or_else(|| Rc::clone(term)),
        Term::Abstraction { argument, body } => {
            Term::abstraction(argument.clone(), evaluate(body, &env.without(argument)))
        }
        Term::Application { function, argument } => match function.as_ref() {
            Term::Abstraction {
                argument: parameter,
                body,
            } => evaluate(body, &env.bind(parameter.clone(), Rc::clone(argument))),
            _ => Term::application(evaluate(function, env), evaluate(argument, env)),
        },
    }
}
