//! Name-or-function slots and the function types they hold.

use std::fmt;
use std::rc::Rc;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, Serializer};

use crate::field::Field;
use crate::relation::Dependency;
use crate::Result;

/// Predicate evaluated against the field a dependency points at.
pub type LogicFn = Rc<dyn Fn(&Dependency, &dyn Field) -> bool>;

/// Combinator reducing the per-dependency booleans of a relation to one.
pub type PatternFn = Rc<dyn Fn(&[bool]) -> bool>;

/// Effect applied to a target field given the combined relation state.
pub type ActionFn = Rc<dyn Fn(bool, &dyn Field) -> Result<()>>;

/// A configurable slot: either the name of a registered entry or an inline function.
///
/// Config files can only carry names. Inline entries are attached in code and
/// refuse to serialize.
#[derive(Clone)]
pub enum Spec<F> {
    Named(String),
    Inline(F),
}

pub type LogicSpec = Spec<LogicFn>;
pub type PatternSpec = Spec<PatternFn>;
pub type ActionSpec = Spec<ActionFn>;

impl<F> Spec<F> {
    /// Creates a named reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the registered name, if this is a named reference.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Inline(_) => None,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

impl LogicSpec {
    /// Wraps an inline predicate.
    pub fn from_fn(f: impl Fn(&Dependency, &dyn Field) -> bool + 'static) -> Self {
        Self::Inline(Rc::new(f))
    }
}

impl PatternSpec {
    /// Wraps an inline combinator.
    pub fn from_fn(f: impl Fn(&[bool]) -> bool + 'static) -> Self {
        Self::Inline(Rc::new(f))
    }
}

impl ActionSpec {
    /// Wraps an inline action.
    pub fn from_fn(f: impl Fn(bool, &dyn Field) -> Result<()> + 'static) -> Self {
        Self::Inline(Rc::new(f))
    }
}

/// Relations combine their dependencies with `all` unless told otherwise.
impl Default for PatternSpec {
    fn default() -> Self {
        Self::named("all")
    }
}

/// A dependency without a logic resolves to nothing.
impl Default for LogicSpec {
    fn default() -> Self {
        Self::named("")
    }
}

impl<F> From<&str> for Spec<F> {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl<F> From<String> for Spec<F> {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl<F> fmt::Debug for Spec<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Inline(_) => f.write_str("Inline(..)"),
        }
    }
}

impl<F> Serialize for Spec<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Named(name) => serializer.serialize_str(name),
            Self::Inline(_) => Err(S::Error::custom("inline entries cannot be serialized")),
        }
    }
}

impl<'de, F> Deserialize<'de> for Spec<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Named)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pattern_is_all() {
        assert_eq!(PatternSpec::default().name(), Some("all"));
    }

    #[test]
    fn named_roundtrips_through_json() {
        let spec: ActionSpec = serde_json::from_str("\"show\"").unwrap();
        assert_eq!(spec.name(), Some("show"));
        assert_eq!(serde_json::to_string(&spec).unwrap(), "\"show\"");
    }

    #[test]
    fn inline_refuses_to_serialize() {
        let spec = PatternSpec::from_fn(|states| states.len() > 1);
        assert!(spec.is_inline());
        assert!(serde_json::to_string(&spec).is_err());
        assert_eq!(format!("{spec:?}"), "Inline(..)");
    }
}
