//! Relation set loading from JSON or TOML.
//!
//! Both formats carry a top-level `relations` list:
//!
//! ```toml
//! [[relations]]
//! dependences = [{ id = "country", logic = "equal", value = "US" }]
//! targets = ["state"]
//! actions = ["show"]
//! ```
//!
//! JSON additionally accepts a bare array of relations.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::relation::{Relation, RelationId};
use crate::{RelationError, Result};

/// An ordered, validated list of relations.
#[derive(Debug, Clone, Default)]
pub struct RelationSet {
    relations: Vec<Relation>,
}

#[derive(Deserialize)]
struct RelationFile {
    #[serde(default)]
    relations: Vec<Relation>,
}

#[derive(Serialize)]
struct RelationFileRef<'a> {
    relations: &'a [Relation],
}

impl RelationSet {
    /// Validates every relation and keeps them in declaration order.
    pub fn new(relations: Vec<Relation>) -> Result<Self> {
        for (index, relation) in relations.iter().enumerate() {
            relation.validate(RelationId::new(index))?;
        }
        Ok(Self { relations })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let relations = match serde_json::from_str::<Value>(json)? {
            list @ Value::Array(_) => serde_json::from_value(list)?,
            other => serde_json::from_value::<RelationFile>(other)?.relations,
        };
        Self::new(relations)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let file: RelationFile = toml::from_str(source)?;
        Self::new(file.relations)
    }

    /// Loads a relation file, picking the format from the extension
    /// (`.toml`, anything else is read as JSON).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let set = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&contents)?,
            _ => Self::from_json(&contents)?,
        };
        info!(path = %path.display(), relations = set.len(), "Loaded relation file");
        Ok(set)
    }

    /// Serializes as `{"relations": [...]}`. Fails if any slot is inline.
    pub fn to_json(&self) -> Result<String> {
        for (id, relation) in self.iter() {
            if let Some(slot) = relation.inline_slot() {
                return Err(RelationError::InlineNotSerializable {
                    relation: relation.label(id),
                    slot,
                });
            }
        }
        let file = RelationFileRef {
            relations: &self.relations,
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn get(&self, id: RelationId) -> Option<&Relation> {
        self.relations.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RelationId, &Relation)> {
        self.relations
            .iter()
            .enumerate()
            .map(|(index, relation)| (RelationId::new(index), relation))
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}
