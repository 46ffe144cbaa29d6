//! Named vocabularies of logics, patterns and actions.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use formrel_model::{ActionFn, Dependency, Field, LogicFn, PatternFn, Result, Spec};

use crate::{action, logic, pattern};

/// Name to function table with function-or-name resolution.
pub struct Registry<F> {
    entries: HashMap<String, F>,
}

impl<F: Clone> Registry<F> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers `entry` under `name`, returning the entry it replaces.
    pub fn register(&mut self, name: impl Into<String>, entry: F) -> Option<F> {
        self.entries.insert(name.into(), entry)
    }

    pub fn get(&self, name: &str) -> Option<&F> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Inline entries resolve to themselves, names go through the table.
    pub fn resolve(&self, spec: &Spec<F>) -> Option<F> {
        match spec {
            Spec::Inline(entry) => Some(entry.clone()),
            Spec::Named(name) => self.entries.get(name).cloned(),
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F: Clone> Default for Registry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for Registry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("names", &names).finish()
    }
}

/// The three vocabularies an engine resolves relation slots against.
///
/// Populate at startup, then wrap in an `Rc` and hand the same instance to
/// every engine: once shared it can no longer be mutated.
#[derive(Debug, Default)]
pub struct Registries {
    pub logics: Registry<LogicFn>,
    pub patterns: Registry<PatternFn>,
    pub actions: Registry<ActionFn>,
}

impl Registries {
    /// Registries seeded with `equal`; `all`, `any`; `show`, `hide`, `disable`, `enable`.
    pub fn builtin() -> Self {
        let mut registries = Self::default();
        logic::register_builtins(&mut registries.logics);
        pattern::register_builtins(&mut registries.patterns);
        action::register_builtins(&mut registries.actions);
        registries
    }

    pub fn register_logic(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&Dependency, &dyn Field) -> bool + 'static,
    ) -> &mut Self {
        self.logics.register(name, Rc::new(f));
        self
    }

    pub fn register_pattern(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&[bool]) -> bool + 'static,
    ) -> &mut Self {
        self.patterns.register(name, Rc::new(f));
        self
    }

    pub fn register_action(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(bool, &dyn Field) -> Result<()> + 'static,
    ) -> &mut Self {
        self.actions.register(name, Rc::new(f));
        self
    }
}
