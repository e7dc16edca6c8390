use std::rc::Rc;

use lambda_syntax::{NoopTracer, Term, Tracer};

use crate::env::Environment;
use crate::evaluate::evaluate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceConfig {
    /// Stop after this many evaluation passes. Unbounded when `None`.
    pub max_steps: Option<usize>,
}

/// Why reduction stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// A pass left the rendering of the term unchanged.
    NormalForm,
    /// `max_steps` passes ran without reaching a normal form.
    StepLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub term: Rc<Term>,
    pub steps: usize,
    pub halt: Halt,
}

/// Drives evaluation passes until the term stops changing.
pub struct Reducer<'t> {
    tracer: &'t dyn Tracer,
    config: ReduceConfig,
}

impl<'t> Reducer<'t> {
    pub fn new(tracer: &'t dyn Tracer, config: ReduceConfig) -> Self {
        Self { tracer, config }
    }

    /// One pass under the empty environment.
    pub fn step(&self, term: &Rc<Term>) -> Rc<Term> {
        evaluate(term, &Environment::new())
    }

    /// Evaluate repeatedly until a pass renders the same text as its input.
    ///
    /// The comparison is on the canonical rendering, which reads back to the
    /// same tree, so equal text means an unchanged term. A term that only
    /// reproduces itself, such as `(\x.x x) (\x.x x)`, therefore counts as a
    /// normal form. Terms that keep growing run until `max_steps`, or forever
    /// without it.
    pub fn normalize(&self, term: Rc<Term>) -> Reduction {
        let mut current = term;
        let mut rendered = current.to_string();
        let mut steps = 0;

        loop {
            if self.config.max_steps.is_some_and(|max| steps >= max) {
                log::debug!("step limit reached after {steps} steps");
                return Reduction {
                    term: current,
                    steps,
                    halt: Halt::StepLimit,
                };
            }

            let next = self.step(&current);
            steps += 1;
            self.tracer.reduced(steps, &next);

            let next_rendered = next.to_string();
            if next_rendered == rendered {
                log::debug!("normal form reached after {steps} steps");
                return Reduction {
                    term: next,
                    steps,
                    halt: Halt::NormalForm,
                };
            }

            current = next;
            rendered = next_rendered;
        }
    }
}

impl Default for Reducer<'static> {
    fn default() -> Self {
        Self::new(&NoopTracer, ReduceConfig::default())
    }
}
