//! In-process backend backed by the local ledger engine

use super::{AvailableModel, Backend, ClientError, HeaderLayer, RunRequest, RunResponse};
use crate::client::fallback::stub_models;
use crate::config::BackendKind;
use crate::engine::Engine;

/// Answers requests with the stub-model ledger engine
#[derive(Debug, Clone)]
pub struct LocalBackend {
    models: Vec<AvailableModel>,
}

impl LocalBackend {
    /// Create a local backend exposing the stub model list
    #[must_use]
    pub fn new() -> Self {
        Self {
            models: stub_models(),
        }
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for LocalBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn list_models(&self) -> Result<Vec<AvailableModel>, ClientError> {
        Ok(self.models.clone())
    }

    fn run(&self, request: &RunRequest) -> Result<RunResponse, ClientError> {
        let engine = Engine::with_stubs(&request.models);
        let transcript = engine.run(&request.original_prompt, request.topology)?;
        let header_stack = transcript
            .layers()
            .into_iter()
            .map(|(model, response)| HeaderLayer { model, response })
            .collect();
        Ok(RunResponse {
            final_response: Some(transcript.final_response),
            header_stack: Some(header_stack),
        })
    }
}
