//! Reverse dependency index: field id to the relations relying on it.

use std::collections::HashMap;

use formrel_model::{RelationId, RelationSet};

/// Built once per bind from the full relation set and never patched; a new
/// relation set means a new index.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    by_field: HashMap<String, Vec<RelationId>>,
}

impl DependencyIndex {
    /// Scans every relation in declaration order. A relation appears at most
    /// once per field even when several of its dependencies name that field.
    pub fn build(relations: &RelationSet) -> Self {
        let mut by_field: HashMap<String, Vec<RelationId>> = HashMap::new();
        for (id, relation) in relations.iter() {
            for dependency in &relation.dependences {
                let reliers = by_field.entry(dependency.id.clone()).or_default();
                // Relations are visited in order, so a duplicate can only be the last entry.
                if reliers.last() != Some(&id) {
                    reliers.push(id);
                }
            }
        }
        Self { by_field }
    }

    /// Relations depending on `field_id`, in declaration order.
    pub fn reliers(&self, field_id: &str) -> &[RelationId] {
        self.by_field.get(field_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Field ids with at least one relier.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.by_field.keys().map(String::as_str)
    }

    /// Number of indexed fields.
    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }
}
