//! Relation and dependency declarations.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::spec::{ActionSpec, LogicSpec, PatternSpec};
use crate::{RelationError, Result};

/// Position of a relation inside its [`crate::RelationSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId(usize);

impl RelationId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A driving field plus the condition checked against its value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    /// Identifier of the field being examined.
    #[serde(alias = "childName", alias = "child_name")]
    pub id: String,
    /// Left out in config, it names no logic and the dependency counts as `false`.
    #[serde(default)]
    pub logic: LogicSpec,
    /// Operand for equality-style logics.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
    /// Extra parameters for custom logics.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl Dependency {
    pub fn new(id: impl Into<String>, logic: impl Into<LogicSpec>) -> Self {
        Self {
            id: id.into(),
            logic: logic.into(),
            value: Value::Null,
            params: Map::new(),
        }
    }

    /// Shorthand for an `equal` dependency.
    pub fn equal(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(id, "equal").with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

/// Declarative rule: when the dependencies combine to a state, apply the
/// actions to every target with that state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    /// Label used in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub dependences: Vec<Dependency>,
    #[serde(default)]
    pub pattern: PatternSpec,
    #[serde(deserialize_with = "one_or_many")]
    pub targets: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub actions: Vec<ActionSpec>,
}

impl Relation {
    /// Starts a relation over `dependences` with the default `all` pattern
    /// and no targets or actions yet.
    pub fn new(dependences: Vec<Dependency>) -> Self {
        Self {
            name: None,
            dependences,
            pattern: PatternSpec::default(),
            targets: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<PatternSpec>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn target(mut self, id: impl Into<String>) -> Self {
        self.targets.push(id.into());
        self
    }

    pub fn action(mut self, action: impl Into<ActionSpec>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// `name` if set, otherwise the position in the set.
    pub fn label(&self, id: RelationId) -> String {
        match &self.name {
            Some(name) => format!("'{name}'"),
            None => id.to_string(),
        }
    }

    /// Checks the structural invariants: at least one dependency, target and action.
    pub fn validate(&self, id: RelationId) -> Result<()> {
        let reason = if self.dependences.is_empty() {
            "no dependences declared"
        } else if self.targets.is_empty() {
            "no targets declared"
        } else if self.actions.is_empty() {
            "no actions declared"
        } else {
            return Ok(());
        };
        Err(RelationError::InvalidRelation {
            relation: self.label(id),
            reason: reason.to_string(),
        })
    }

    /// Returns the first slot holding an inline function, if any.
    pub(crate) fn inline_slot(&self) -> Option<&'static str> {
        if self.pattern.is_inline() {
            Some("pattern")
        } else if self.dependences.iter().any(|d| d.logic.is_inline()) {
            Some("logic")
        } else if self.actions.iter().any(|a| a.is_inline()) {
            Some("action")
        } else {
            None
        }
    }
}

/// Accepts either a single entry or a list of entries.
fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        One(T),
        Many(Vec<T>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(item) => vec![item],
        OneOrMany::Many(items) => items,
    })
}
