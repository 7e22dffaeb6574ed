//! Pluggable model interface

use super::EngineError;

/// A model the local engine can route hops through.
pub trait Model: Send + Sync {
    /// Model name recorded in the ledger
    fn name(&self) -> &str;

    /// Answer a hop prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot produce a response.
    fn call(&self, prompt: &str) -> Result<String, EngineError>;
}

/// Offline stand-in that echoes the prompt it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubModel {
    name: String,
}

impl StubModel {
    /// Create a stub with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Model for StubModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, prompt: &str) -> Result<String, EngineError> {
        Ok(format!("Full response from {}: \"{prompt}\"", self.name))
    }
}
