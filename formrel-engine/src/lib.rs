//! Reactive relation engine for form fields.
//!
//! A [`RelationEngine`] attaches to one [`Container`], builds a
//! [`DependencyIndex`] once the container is ready, and re-evaluates only the
//! relations that depend on a field whenever that field changes. Relation
//! slots are resolved through [`Registries`]: named logics, patterns and
//! actions, pre-seeded with the built-ins and open for extension.
//!
//! Evaluation is synchronous and single-threaded. Actions may change other
//! fields and cascade into further evaluation; a relation re-entered while it
//! is still running is reported as [`RelationError::Cycle`].

pub mod action;
mod engine;
mod index;
pub mod logic;
pub mod pattern;
mod registry;

pub use engine::RelationEngine;
pub use index::DependencyIndex;
pub use registry::{Registries, Registry};

pub use formrel_model::{
    ActionFn, ActionSpec, Container, ContainerListener, Dependency, Field, ListenerId, LogicFn,
    LogicSpec, PatternFn, PatternSpec, Relation, RelationError, RelationId, RelationSet, Result,
    Spec,
};
