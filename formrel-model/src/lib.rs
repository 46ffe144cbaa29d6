//! Declarative model for form field relations.
//!
//! Defines the types every formrel crate depends on:
//! - [`Relation`] / [`Dependency`]: plain-data rules linking driving fields to
//!   target fields through a logic, a pattern and a list of actions
//! - [`Spec`]: a slot holding either a registered name or an inline function
//! - [`Field`] / [`Container`]: the narrow capabilities the engine consumes
//!   from the form it is attached to
//! - [`RelationSet`]: a validated, ordered relation list loadable from JSON or TOML
//!
//! Behavior (registries, indexing, evaluation) lives in `formrel-engine`.

mod config;
mod error;
mod field;
mod relation;
mod spec;

pub use config::RelationSet;
pub use error::{RelationError, Result};
pub use field::{Container, ContainerListener, Field, ListenerId};
pub use relation::{Dependency, Relation, RelationId};
pub use spec::{ActionFn, ActionSpec, LogicFn, LogicSpec, PatternFn, PatternSpec, Spec};
