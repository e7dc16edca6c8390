use std::rc::Rc;

use lambda_syntax::Term;

/// Name-to-term bindings visible at some point of evaluation.
///
/// A persistent chain of scopes: `bind` and `without` return a new
/// environment that shares every existing scope with `self`. Nothing is ever
/// updated in place, so evaluating one subterm cannot leak bindings into a
/// sibling.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    scope: Option<Rc<Scope>>,
}

#[derive(Debug)]
struct Scope {
    name: String,
    // `None` hides any outer binding of `name`
    binding: Option<Rc<Term>>,
    parent: Option<Rc<Scope>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The innermost binding of `name`, if it is bound and not hidden.
    pub fn lookup(&self, name: &str) -> Option<&Rc<Term>> {
        let mut scope = self.scope.as_deref();
        while let Some(frame) = scope {
            if frame.name == name {
                return frame.binding.as_ref();
            }
            scope = frame.parent.as_deref();
        }
        None
    }

    pub fn bind(&self, name: impl Into<String>, term: Rc<Term>) -> Self {
        self.push(name.into(), Some(term))
    }

    /// An environment in which `name` is unbound.
    pub fn without(&self, name: &str) -> Self {
        if self.lookup(name).is_none() {
            return self.clone();
        }
        self.push(name.to_string(), None)
    }

    fn push(&self, name: String, binding: Option<Rc<Term>>) -> Self {
        Self {
            scope: Some(Rc::new(Scope {
                name,
                binding,
                parent: self.scope.clone(),
            })),
        }
    }
}
