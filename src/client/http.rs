//! HTTP backend for the external MAIRE service

use super::{
    AvailableModel, Backend, ClientError, MODELS_PATH, ModelsPayload, RUN_PATH, RunRequest,
    RunResponse,
};
use crate::config::{BackendKind, Config};
use std::time::Duration;
use tracing::{debug, info};
use ureq::Agent;

/// Talks to `/maire/models` and `/maire/run` over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    agent: Agent,
    models_url: String,
    run_url: String,
}

impl HttpBackend {
    /// Create a backend for a base URL with an optional global timeout
    #[must_use]
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Self {
        let config = ureq::config::Config::builder()
            .timeout_global(timeout)
            .build();
        let base = endpoint.trim_end_matches('/');
        Self {
            agent: config.new_agent(),
            models_url: format!("{base}{MODELS_PATH}"),
            run_url: format!("{base}{RUN_PATH}"),
        }
    }

    /// Create a backend from the endpoint and timeout in `config`
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.endpoint, config.request_timeout())
    }

    fn map_error(url: &str, err: ureq::Error) -> ClientError {
        match err {
            ureq::Error::StatusCode(status) => ClientError::Status {
                url: url.to_string(),
                status,
            },
            other => ClientError::Transport {
                url: url.to_string(),
                source: other,
            },
        }
    }

    fn invalid_body(url: &str, err: &ureq::Error) -> ClientError {
        ClientError::InvalidBody {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

impl Backend for HttpBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    fn list_models(&self) -> Result<Vec<AvailableModel>, ClientError> {
        let url = &self.models_url;
        debug!(%url, "Fetching models");
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| Self::map_error(url, e))?;
        let payload: ModelsPayload = response
            .into_body()
            .read_json()
            .map_err(|e| Self::invalid_body(url, &e))?;
        let models = payload.into_models();
        info!(count = models.len(), "Fetched models from service");
        Ok(models)
    }

    fn run(&self, request: &RunRequest) -> Result<RunResponse, ClientError> {
        let url = &self.run_url;
        debug!(
            %url,
            topology = request.topology.slug(),
            models = request.models.len(),
            "Submitting run"
        );
        let response = self
            .agent
            .post(url)
            .send_json(request)
            .map_err(|e| Self::map_error(url, e))?;
        let body: RunResponse = response
            .into_body()
            .read_json()
            .map_err(|e| Self::invalid_body(url, &e))?;
        info!(
            layers = body.header_stack.as_ref().map_or(0, Vec::len),
            "Run completed"
        );
        Ok(body)
    }
}
