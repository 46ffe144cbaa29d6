//! Built-in patterns.

use std::rc::Rc;

use formrel_model::PatternFn;

use crate::Registry;

/// True when every state is true. Vacuously true for no states.
pub fn all(states: &[bool]) -> bool {
    states.iter().all(|state| *state)
}

/// True when at least one state is true.
pub fn any(states: &[bool]) -> bool {
    states.iter().any(|state| *state)
}

pub(crate) fn register_builtins(patterns: &mut Registry<PatternFn>) {
    patterns.register("all", Rc::new(all));
    patterns.register("any", Rc::new(any));
}
