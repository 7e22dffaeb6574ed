//! Client side of the MAIRE service
//!
//! The engine is reached through two endpoints, `GET /maire/models` and
//! `POST /maire/run`. [`Backend`] abstracts over where those calls go, and
//! [`fallback`] wraps any backend with the placeholder policy the UI relies on.

pub mod fallback;
mod http;
mod local;

pub use fallback::{ActiveSlot, Answer, AnswerSource, ModelList, ModelSource};
pub use http::HttpBackend;
pub use local::LocalBackend;

use crate::config::{BackendKind, Config};
use crate::engine::EngineError;
use crate::topology::Topology;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Path of the model listing endpoint
pub const MODELS_PATH: &str = "/maire/models";

/// Path of the run endpoint
pub const RUN_PATH: &str = "/maire/run";

/// A model the engine can route prompts through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableModel {
    /// Identifier sent back in run requests
    pub id: String,
    /// Display name
    pub name: String,
}

impl AvailableModel {
    /// Build a descriptor from id and name
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Body of `GET /maire/models`, which comes in two shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ModelsPayload {
    /// `[{id, name}, ...]`
    List(Vec<AvailableModel>),
    /// `{ "models": [...] }`
    Wrapped {
        /// Wrapped list
        models: Vec<AvailableModel>,
    },
}

impl ModelsPayload {
    pub(crate) fn into_models(self) -> Vec<AvailableModel> {
        match self {
            Self::List(models) | Self::Wrapped { models } => models,
        }
    }
}

/// Body of `POST /maire/run`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRequest {
    /// Prompt as typed by the user (trimmed)
    pub original_prompt: String,
    /// Selected topology
    pub topology: Topology,
    /// Model ids of the enabled slots, in slot order
    pub models: Vec<String>,
}

/// One per-model response in the header stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderLayer {
    /// Model label
    pub model: String,
    /// Full response text
    pub response: String,
}

/// Response of `POST /maire/run`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    /// Synthesized answer
    #[serde(default)]
    pub final_response: Option<String>,
    /// Per-model responses
    #[serde(default)]
    pub header_stack: Option<Vec<HeaderLayer>>,
}

/// Errors talking to a backend
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered with a non-success status
    #[error("request to {url} failed with status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },
    /// The request never produced a response
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying transport error
        #[source]
        source: ureq::Error,
    },
    /// The response body could not be decoded
    #[error("invalid response from {url}: {message}")]
    InvalidBody {
        /// Requested URL
        url: String,
        /// Decoder message
        message: String,
    },
    /// The local engine failed
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Where model listings and runs are sent
pub trait Backend: Send + Sync {
    /// Which kind of backend this is
    fn kind(&self) -> BackendKind;

    /// Fetch the models the engine exposes
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    fn list_models(&self) -> Result<Vec<AvailableModel>, ClientError>;

    /// Execute a run
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    fn run(&self, request: &RunRequest) -> Result<RunResponse, ClientError>;
}

/// Build the backend selected by the config
#[must_use]
pub fn backend_from_config(config: &Config) -> Arc<dyn Backend> {
    match config.backend {
        BackendKind::Remote => Arc::new(HttpBackend::from_config(config)),
        BackendKind::Local => Arc::new(LocalBackend::new()),
    }
}
