//! Shared types for the `formrel` binary: field changes, the simulation run
//! and its report.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use anyhow::{Context, Result};
use formrel_engine::{RelationEngine, RelationSet};
use formrel_form::{FieldState, FormSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

/// A `--set id=value` change. The value is parsed as JSON when possible and
/// kept as a plain string otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub field: String,
    pub value: Value,
}

impl FromStr for Change {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (field, raw) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ID=VALUE, got '{s}'"))?;
        if field.is_empty() {
            return Err(format!("missing field id in '{s}'"));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        Ok(Self {
            field: field.to_string(),
            value,
        })
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

/// Final state of a simulated form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub fields: Vec<FieldState>,
    pub data: Map<String, Value>,
}

/// Builds the form, binds an engine to it, applies `changes` in order and
/// reports the resulting field states.
pub fn simulate(relations: RelationSet, snapshot: FormSnapshot, changes: &[Change]) -> Result<Report> {
    let form = Rc::new(snapshot.into_form().context("building form from snapshot")?);
    let engine = Rc::new(RelationEngine::new(relations));

    engine.activate(form.clone()).context("activating relation engine")?;
    form.mark_ready().context("binding relations")?;

    for change in changes {
        info!(change = %change, "Applying change");
        form.set_value(&change.field, change.value.clone())
            .with_context(|| format!("applying {change}"))?;
    }
    engine.dispose();

    Ok(Report {
        fields: form.states(),
        data: form.data(),
    })
}
