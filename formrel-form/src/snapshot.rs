//! Serializable views of a form: snapshots to build one, states to report on one.

use formrel_model::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Form, FormError, FormField};

/// Description of one element for building a [`Form`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Value,
    /// `false` for labels, panels and other non-input elements.
    #[serde(default = "default_true")]
    pub input: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// `{"fields": [...]}` in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(default)]
    pub fields: Vec<FieldSnapshot>,
}

impl FormSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn into_form(self) -> Result<Form, FormError> {
        Form::from_fields(self.fields.into_iter().map(FieldSnapshot::into_field))
    }
}

impl FieldSnapshot {
    fn into_field(self) -> FormField {
        let mut field = if self.input {
            FormField::input(self.id, self.value)
        } else {
            FormField::element(self.id)
        };
        if let Some(name) = self.name {
            field = field.with_name(name);
        }
        if !self.visible {
            field = field.hidden();
        }
        if !self.enabled {
            field = field.disabled();
        }
        field
    }
}

/// Observable state of one element after relations have run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    pub id: String,
    pub value: Value,
    pub visible: bool,
    pub enabled: bool,
}

impl Form {
    /// States of every element in document order.
    pub fn states(&self) -> Vec<FieldState> {
        self.elements()
            .iter()
            .map(|field| FieldState {
                id: field.id().to_string(),
                value: field.value(),
                visible: field.is_visible(),
                enabled: field.is_enabled(),
            })
            .collect()
    }
}
