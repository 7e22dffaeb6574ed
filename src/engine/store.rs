//! Content-addressed storage for hop bodies

use super::ledger::content_hash;
use std::collections::HashMap;

/// Full hop bodies keyed by their SHA-256 reference.
#[derive(Debug, Default, Clone)]
pub struct BodyStore {
    bodies: HashMap<String, String>,
}

impl BodyStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a body and return its reference. Identical bodies share an entry.
    pub fn insert(&mut self, body: impl Into<String>) -> String {
        let body = body.into();
        let reference = content_hash(&body);
        self.bodies.entry(reference.clone()).or_insert(body);
        reference
    }

    /// Look up a body by reference
    #[must_use]
    pub fn get(&self, reference: &str) -> Option<&str> {
        self.bodies.get(reference).map(String::as_str)
    }

    /// Number of distinct bodies
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
