use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use formrel_model::{Container, ContainerListener, Field, ListenerId};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{FormError, FormField};

/// A flat, in-memory form.
///
/// Notifications are delivered synchronously. Listeners may call back into
/// the form (for example to change another field) while a notification is
/// being delivered.
#[derive(Default)]
pub struct Form {
    elements: RefCell<Vec<Rc<FormField>>>,
    listeners: RefCell<Vec<(ListenerId, Weak<dyn ContainerListener>)>>,
    next_listener: Cell<u64>,
    ready: Cell<bool>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a form from `fields` in document order.
    pub fn from_fields(fields: impl IntoIterator<Item = FormField>) -> Result<Self, FormError> {
        let form = Self::new();
        for field in fields {
            form.add(field)?;
        }
        Ok(form)
    }

    /// Appends an element. Ids are unique across inputs and other elements.
    pub fn add(&self, field: FormField) -> Result<Rc<FormField>, FormError> {
        if self.get(field.id()).is_some() {
            return Err(FormError::DuplicateField(field.id().to_string()));
        }
        let field = Rc::new(field);
        self.elements.borrow_mut().push(Rc::clone(&field));
        Ok(field)
    }

    /// Any element by id.
    pub fn get(&self, id: &str) -> Option<Rc<FormField>> {
        self.elements
            .borrow()
            .iter()
            .find(|field| field.id() == id)
            .cloned()
    }

    /// Elements in document order.
    pub fn elements(&self) -> Vec<Rc<FormField>> {
        self.elements.borrow().clone()
    }

    /// Sets an input's value and, if it changed, notifies every listener.
    ///
    /// The first listener error stops delivery and is returned.
    pub fn set_value(&self, id: &str, value: impl Into<Value>) -> Result<(), FormError> {
        let field = self
            .get(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        if !field.is_input() {
            return Err(FormError::NotAnInput(id.to_string()));
        }
        if !field.replace_value(value.into()) {
            trace!(field = %id, "Value unchanged, no notification");
            return Ok(());
        }

        trace!(field = %id, "Field changed");
        for listener in self.live_listeners() {
            listener.on_field_change(field.as_ref())?;
        }
        Ok(())
    }

    /// Marks the structure complete and signals listeners. Only the first call notifies.
    pub fn mark_ready(&self) -> Result<(), FormError> {
        if self.ready.replace(true) {
            return Ok(());
        }
        debug!(elements = self.elements.borrow().len(), "Form ready");
        for listener in self.live_listeners() {
            listener.on_ready()?;
        }
        Ok(())
    }

    /// Values of the enabled inputs keyed by name. Inputs sharing a name are
    /// concatenated into one flat array in document order.
    pub fn data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        for field in self.elements.borrow().iter() {
            if !field.is_input() || !field.is_enabled() {
                continue;
            }
            let value = field.value();
            match data.get_mut(field.name()) {
                Some(existing) => {
                    let mut merged = match existing.take() {
                        Value::Array(values) => values,
                        other => vec![other],
                    };
                    match value {
                        Value::Array(values) => merged.extend(values),
                        other => merged.push(other),
                    }
                    *existing = Value::Array(merged);
                }
                None => {
                    data.insert(field.name().to_string(), value);
                }
            }
        }
        data
    }

    /// Number of listeners still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(_, listener)| listener.strong_count() > 0)
            .count()
    }

    fn live_listeners(&self) -> Vec<Rc<dyn ContainerListener>> {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|(_, listener)| listener.strong_count() > 0);
        listeners
            .iter()
            .filter_map(|(_, listener)| listener.upgrade())
            .collect()
    }
}

impl Container for Form {
    fn input_fields(&self) -> Vec<Rc<dyn Field>> {
        self.elements
            .borrow()
            .iter()
            .filter(|field| field.is_input())
            .map(|field| Rc::clone(field) as Rc<dyn Field>)
            .collect()
    }

    fn field(&self, id: &str) -> Option<Rc<dyn Field>> {
        self.get(id)
            .filter(|field| field.is_input())
            .map(|field| field as Rc<dyn Field>)
    }

    fn target(&self, id: &str) -> Option<Rc<dyn Field>> {
        self.get(id).map(|field| field as Rc<dyn Field>)
    }

    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn subscribe(&self, listener: Weak<dyn ContainerListener>) -> ListenerId {
        let id = ListenerId::new(self.next_listener.get());
        self.next_listener.set(id.as_u64() + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("elements", &self.elements.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .field("ready", &self.ready.get())
            .finish()
    }
}
