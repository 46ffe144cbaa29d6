use std::cell::{Cell, RefCell};

use formrel_model::Field;
use serde_json::Value;

/// An element of a [`crate::Form`].
///
/// Inputs carry a name and a value and take part in enumeration, dependency
/// lookup and data collection. Other elements (labels, panels) can only be
/// action targets.
#[derive(Debug)]
pub struct FormField {
    id: String,
    name: Option<String>,
    input: bool,
    value: RefCell<Value>,
    visible: Cell<bool>,
    enabled: Cell<bool>,
}

impl FormField {
    /// An input field, visible and enabled, named after its id.
    pub fn input(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            name: None,
            input: true,
            value: RefCell::new(value.into()),
            visible: Cell::new(true),
            enabled: Cell::new(true),
        }
    }

    /// A non-input element.
    pub fn element(id: impl Into<String>) -> Self {
        Self {
            input: false,
            ..Self::input(id, Value::Null)
        }
    }

    /// Sets the submission name; several inputs may share one.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn hidden(self) -> Self {
        self.visible.set(false);
        self
    }

    pub fn disabled(self) -> Self {
        self.enabled.set(false);
        self
    }

    /// Submission name, defaulting to the id.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn is_input(&self) -> bool {
        self.input
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Stores `value`, returning whether it differs from the previous one.
    pub(crate) fn replace_value(&self, value: Value) -> bool {
        let previous = self.value.replace(value);
        previous != *self.value.borrow()
    }
}

impl Field for FormField {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    fn show(&self) {
        self.visible.set(true);
    }

    fn hide(&self) {
        self.visible.set(false);
    }

    fn enable(&self) {
        self.enabled.set(true);
    }

    fn disable(&self) {
        self.enabled.set(false);
    }
}
