//! Per-format lookup keyed by field type.
//!
//! Each generator builds one table that maps the field types it supports
//! to a renderer (or a target type name) and names a fallback for
//! everything else, so an unmapped type degrades instead of failing.

use std::collections::HashMap;

use formsmith_core::enums::FieldType;

/// A closed field-type lookup with a fallback entry.
#[derive(Debug, Clone)]
pub struct RendererTable<R> {
    entries: HashMap<FieldType, R>,
    fallback: R,
}

impl<R: Copy> RendererTable<R> {
    pub fn new(fallback: R) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
        }
    }

    /// Maps each of `types` to `entry`.
    pub fn register(mut self, types: &[FieldType], entry: R) -> Self {
        for t in types {
            self.entries.insert(t.clone(), entry);
        }
        self
    }

    /// The entry for `field_type`, or the fallback.
    pub fn get(&self, field_type: &FieldType) -> R {
        self.entries.get(field_type).copied().unwrap_or(self.fallback)
    }

    /// Returns `true` if `field_type` has its own entry.
    pub fn supports(&self, field_type: &FieldType) -> bool {
        self.entries.contains_key(field_type)
    }
}
