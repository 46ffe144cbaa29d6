//! The relation engine: lifecycle, evaluation and dispatch.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};

use formrel_model::{
    ActionFn, Container, ContainerListener, Field, ListenerId, Relation, RelationError, RelationId,
    RelationSet, Result,
};
use tracing::{debug, info, trace, warn};

use crate::{DependencyIndex, Registries};

/// Watches one container and keeps its target fields in line with the
/// configured relations.
///
/// The engine is inert until [`activate`](Self::activate)d. It binds as soon
/// as the container is ready: the dependency index is built, every input field
/// is checked once, and from then on each change notification re-evaluates the
/// relations that depend on the changed field.
pub struct RelationEngine {
    relations: RelationSet,
    registries: Rc<Registries>,
    state: RefCell<EngineState>,
    /// Relations currently between evaluation start and the end of dispatch.
    in_flight: RefCell<HashSet<RelationId>>,
}

#[derive(Default)]
struct EngineState {
    container: Option<Rc<dyn Container>>,
    listener: Option<ListenerId>,
    index: Option<Rc<DependencyIndex>>,
    bound: bool,
}

impl RelationEngine {
    /// Creates an engine resolving against the built-in registries.
    pub fn new(relations: RelationSet) -> Self {
        Self::with_registries(relations, Rc::new(Registries::builtin()))
    }

    /// Creates an engine resolving against shared, pre-populated registries.
    pub fn with_registries(relations: RelationSet, registries: Rc<Registries>) -> Self {
        Self {
            relations,
            registries,
            state: RefCell::new(EngineState::default()),
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    pub fn relations(&self) -> &RelationSet {
        &self.relations
    }

    pub fn registries(&self) -> &Rc<Registries> {
        &self.registries
    }

    /// Subscribed to a container.
    pub fn is_active(&self) -> bool {
        self.state.borrow().listener.is_some()
    }

    /// Initial pass done and reacting to changes.
    pub fn is_bound(&self) -> bool {
        self.state.borrow().bound
    }

    /// The index built at bind time, if bound since the last dispose.
    pub fn index(&self) -> Option<Rc<DependencyIndex>> {
        self.state.borrow().index.clone()
    }

    /// Attaches to `container`. Binds right away if the container is already
    /// ready, otherwise on its ready signal.
    ///
    /// If that immediate bind fails the engine detaches again, so it can be
    /// activated once the container is fixed.
    pub fn activate(self: &Rc<Self>, container: Rc<dyn Container>) -> Result<()> {
        if self.is_active() {
            return Err(RelationError::AlreadyActive);
        }

        let listener: Weak<dyn ContainerListener> = Rc::downgrade(self) as Weak<Self>;
        let listener_id = container.subscribe(listener);
        {
            let mut state = self.state.borrow_mut();
            state.container = Some(Rc::clone(&container));
            state.listener = Some(listener_id);
            state.index = None;
            state.bound = false;
        }
        info!(listener = %listener_id, relations = self.relations.len(), "Relation engine activated");

        if container.is_ready() {
            self.bind().inspect_err(|_| self.dispose())?;
        }
        Ok(())
    }

    /// Builds the index, checks every input field once, then starts reacting
    /// to change notifications. A no-op when already bound.
    pub fn bind(&self) -> Result<()> {
        let container = {
            let mut state = self.state.borrow_mut();
            if state.bound {
                return Ok(());
            }
            if state.listener.is_none() {
                return Err(RelationError::NotActive);
            }
            let container = state.container.clone().ok_or(RelationError::NotActive)?;
            state.index = Some(Rc::new(DependencyIndex::build(&self.relations)));
            container
        };

        let fields = container.input_fields();
        for field in &fields {
            self.check(field.as_ref())?;
        }

        self.state.borrow_mut().bound = true;
        info!(fields = fields.len(), "Relation engine bound");
        Ok(())
    }

    /// Re-evaluates every relation depending on `source` and dispatches its actions.
    ///
    /// A dependency on a field the container cannot resolve aborts the
    /// remaining relations with [`RelationError::MissingField`].
    pub fn check(&self, source: &dyn Field) -> Result<()> {
        if self.relations.is_empty() {
            return Ok(());
        }

        let (container, index) = self.attached()?;
        let reliers = index.reliers(source.id());
        if reliers.is_empty() {
            return Ok(());
        }

        trace!(field = %source.id(), reliers = reliers.len(), "Field change affects relations");
        for &id in reliers {
            if let Some(relation) = self.relations.get(id) {
                self.run(container.as_ref(), id, relation)?;
            }
        }
        Ok(())
    }

    /// Computes the combined state of one relation against the current field values.
    pub fn evaluate(&self, id: RelationId) -> Result<bool> {
        let relation = self
            .relations
            .get(id)
            .ok_or_else(|| RelationError::InvalidRelation {
                relation: id.to_string(),
                reason: "no such relation".to_string(),
            })?;
        let container = self
            .state
            .borrow()
            .container
            .clone()
            .ok_or(RelationError::NotActive)?;
        self.evaluate_in(container.as_ref(), id, relation)
    }

    /// Unsubscribes from the container. Changes are ignored from here on.
    pub fn inactivate(&self) {
        let (container, listener) = {
            let mut state = self.state.borrow_mut();
            state.bound = false;
            (state.container.clone(), state.listener.take())
        };
        if let (Some(container), Some(listener)) = (container, listener) {
            container.unsubscribe(listener);
            info!(listener = %listener, "Relation engine inactivated");
        }
    }

    /// Inactivates, then drops the container reference and the index.
    pub fn dispose(&self) {
        self.inactivate();
        let mut state = self.state.borrow_mut();
        state.container = None;
        state.index = None;
        debug!("Relation engine disposed");
    }

    fn attached(&self) -> Result<(Rc<dyn Container>, Rc<DependencyIndex>)> {
        let state = self.state.borrow();
        match (&state.container, &state.index) {
            (Some(container), Some(index)) => Ok((Rc::clone(container), Rc::clone(index))),
            _ => Err(RelationError::NotActive),
        }
    }

    fn run(&self, container: &dyn Container, id: RelationId, relation: &Relation) -> Result<()> {
        let Some(_guard) = InFlight::enter(&self.in_flight, id) else {
            warn!(relation = %id, "Relation re-entered during its own evaluation");
            return Err(RelationError::Cycle {
                relation: relation.label(id),
            });
        };

        let state = self.evaluate_in(container, id, relation)?;
        debug!(relation = %id, state, "Relation evaluated");
        self.dispatch(container, relation, state)
    }

    fn evaluate_in(
        &self,
        container: &dyn Container,
        id: RelationId,
        relation: &Relation,
    ) -> Result<bool> {
        let mut states = Vec::with_capacity(relation.dependences.len());
        for dependency in &relation.dependences {
            let Some(field) = container.field(&dependency.id) else {
                warn!(relation = %id, field = %dependency.id, "Dependency field not found");
                return Err(RelationError::MissingField {
                    relation: relation.label(id),
                    field: dependency.id.clone(),
                });
            };
            let state = match self.registries.logics.resolve(&dependency.logic) {
                Some(logic) => logic(dependency, field.as_ref()),
                None => {
                    debug!(relation = %id, logic = ?dependency.logic, "Unresolved logic, counting as false");
                    false
                }
            };
            states.push(state);
        }

        match self.registries.patterns.resolve(&relation.pattern) {
            Some(pattern) => Ok(pattern(&states)),
            None => {
                debug!(relation = %id, pattern = ?relation.pattern, "Unresolved pattern, state is false");
                Ok(false)
            }
        }
    }

    fn dispatch(&self, container: &dyn Container, relation: &Relation, state: bool) -> Result<()> {
        let actions: Vec<ActionFn> = relation
            .actions
            .iter()
            .filter_map(|spec| {
                let action = self.registries.actions.resolve(spec);
                if action.is_none() {
                    debug!(action = ?spec, "Unresolved action, skipping");
                }
                action
            })
            .collect();

        for target_id in &relation.targets {
            let Some(target) = container.target(target_id) else {
                trace!(target = %target_id, "Target not found, skipping");
                continue;
            };
            for action in &actions {
                action(state, target.as_ref())?;
            }
        }
        Ok(())
    }
}

impl ContainerListener for RelationEngine {
    fn on_ready(&self) -> Result<()> {
        self.bind()
    }

    fn on_field_change(&self, field: &dyn Field) -> Result<()> {
        let bound = self.state.borrow().bound;
        if bound { self.check(field) } else { Ok(()) }
    }
}

impl fmt::Debug for RelationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("RelationEngine")
            .field("relations", &self.relations.len())
            .field("registries", &self.registries)
            .field("listener", &state.listener)
            .field("bound", &state.bound)
            .finish()
    }
}

/// Marks a relation as running for as long as the guard lives.
struct InFlight<'a> {
    set: &'a RefCell<HashSet<RelationId>>,
    id: RelationId,
}

impl<'a> InFlight<'a> {
    fn enter(set: &'a RefCell<HashSet<RelationId>>, id: RelationId) -> Option<Self> {
        let inserted = set.borrow_mut().insert(id);
        inserted.then(|| Self { set, id })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.borrow_mut().remove(&self.id);
    }
}
