//! Placeholder policy for unreachable or unhelpful backends
//!
//! The UI never surfaces a hard error for either endpoint. A failed or empty
//! model listing is replaced by a fixed stub list, and a failed run is
//! replaced by a mock answer that echoes the prompt per active slot.

use super::{AvailableModel, Backend, HeaderLayer, RunRequest};
use crate::config::BackendKind;
use crate::topology::Topology;
use tracing::warn;

/// Content shown when the engine returns no final response
pub const DEFAULT_FINAL_RESPONSE: &str = "MAIRE complete";

/// Content of a mock answer
pub const MOCK_RESPONSE: &str = "Running in mock mode";

/// Number of prompt characters echoed in each mock layer
pub const MOCK_EXCERPT_CHARS: usize = 80;

/// The fixed model list used when the service offers none
#[must_use]
pub fn stub_models() -> Vec<AvailableModel> {
    vec![
        AvailableModel::new("grok", "Grok (Stub)"),
        AvailableModel::new("claude", "Claude (Stub)"),
        AvailableModel::new("gpt-4", "GPT-4 (Stub)"),
    ]
}

/// Where a model list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    /// Returned by the backend
    Backend,
    /// Stub list substituted after a failure or an empty listing
    Stub,
}

/// Models to offer in the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelList {
    /// Available models (never empty)
    pub models: Vec<AvailableModel>,
    /// Origin of the list
    pub source: ModelSource,
}

/// Fetch the model list, substituting the stub list on failure or emptiness.
#[must_use]
pub fn fetch_models(backend: &dyn Backend) -> ModelList {
    match backend.list_models() {
        Ok(models) if !models.is_empty() => ModelList {
            models,
            source: ModelSource::Backend,
        },
        Ok(_) => {
            warn!("Backend returned no models, using stub list");
            stub_list()
        }
        Err(e) => {
            warn!("Failed to fetch models, using stub list: {e}");
            stub_list()
        }
    }
}

fn stub_list() -> ModelList {
    ModelList {
        models: stub_models(),
        source: ModelSource::Stub,
    }
}

/// An enabled slot taking part in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSlot {
    /// Zero-based position of the slot in the slot list
    pub position: usize,
    /// Model selected in the slot
    pub model_id: String,
}

/// How an answer was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    /// The external service
    Remote,
    /// The in-process ledger engine
    Local,
    /// Fabricated after a failed run
    Mock,
}

impl From<BackendKind> for AnswerSource {
    fn from(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Remote => Self::Remote,
            BackendKind::Local => Self::Local,
        }
    }
}

/// Assistant answer ready to append to the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Final response text
    pub content: String,
    /// Per-model trace, if any
    pub header_stack: Option<Vec<HeaderLayer>>,
    /// How the answer was produced
    pub source: AnswerSource,
}

/// Build the run request for a prompt and the active slots
#[must_use]
pub fn build_request(prompt: &str, topology: Topology, active: &[ActiveSlot]) -> RunRequest {
    RunRequest {
        original_prompt: prompt.to_string(),
        topology,
        models: active.iter().map(|s| s.model_id.clone()).collect(),
    }
}

/// Execute a run, replacing any failure with a mock answer.
#[must_use]
pub fn run_or_mock(
    backend: &dyn Backend,
    prompt: &str,
    topology: Topology,
    active: &[ActiveSlot],
) -> Answer {
    let request = build_request(prompt, topology, active);
    match backend.run(&request) {
        Ok(response) => Answer {
            content: response
                .final_response
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| DEFAULT_FINAL_RESPONSE.to_string()),
            header_stack: response.header_stack,
            source: backend.kind().into(),
        },
        Err(e) => {
            warn!("Run failed, answering in mock mode: {e}");
            mock_answer(prompt, active)
        }
    }
}

/// Fabricate the mock answer for a prompt.
///
/// Each layer is labeled with the slot's 1-based position and echoes the
/// first [`MOCK_EXCERPT_CHARS`] characters of the prompt.
#[must_use]
pub fn mock_answer(prompt: &str, active: &[ActiveSlot]) -> Answer {
    let excerpt: String = prompt.chars().take(MOCK_EXCERPT_CHARS).collect();
    let header_stack = active
        .iter()
        .map(|slot| HeaderLayer {
            model: format!("Model {}", slot.position + 1),
            response: format!("[{}] {excerpt}…", slot.model_id),
        })
        .collect();
    Answer {
        content: MOCK_RESPONSE.to_string(),
        header_stack: Some(header_stack),
        source: AnswerSource::Mock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, RunResponse};
    use pretty_assertions::assert_eq;

    /// Backend returning canned results
    struct Canned {
        models: Option<Vec<AvailableModel>>,
        run: Option<RunResponse>,
    }

    impl Backend for Canned {
        fn kind(&self) -> BackendKind {
            BackendKind::Remote
        }

        fn list_models(&self) -> Result<Vec<AvailableModel>, ClientError> {
            self.models.clone().ok_or_else(|| ClientError::Status {
                url: "test".to_string(),
                status: 502,
            })
        }

        fn run(&self, _request: &RunRequest) -> Result<RunResponse, ClientError> {
            self.run.clone().ok_or_else(|| ClientError::InvalidBody {
                url: "test".to_string(),
                message: "boom".to_string(),
            })
        }
    }

    fn slot(position: usize, model_id: &str) -> ActiveSlot {
        ActiveSlot {
            position,
            model_id: model_id.to_string(),
        }
    }

    #[test]
    fn test_fetch_models_success() {
        let backend = Canned {
            models: Some(vec![AvailableModel::new("o3", "O3")]),
            run: None,
        };
        let list = fetch_models(&backend);
        assert_eq!(list.source, ModelSource::Backend);
        assert_eq!(list.models, vec![AvailableModel::new("o3", "O3")]);
    }

    #[test]
    fn test_fetch_models_empty_uses_stubs() {
        let backend = Canned {
            models: Some(Vec::new()),
            run: None,
        };
        let list = fetch_models(&backend);
        assert_eq!(list.source, ModelSource::Stub);
        assert_eq!(list.models, stub_models());
    }

    #[test]
    fn test_fetch_models_error_uses_stubs() {
        let backend = Canned {
            models: None,
            run: None,
        };
        let list = fetch_models(&backend);
        assert_eq!(list.source, ModelSource::Stub);
        assert_eq!(
            list.models.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            vec!["Grok (Stub)", "Claude (Stub)", "GPT-4 (Stub)"]
        );
    }

    #[test]
    fn test_run_success_passes_through() {
        let backend = Canned {
            models: None,
            run: Some(RunResponse {
                final_response: Some("42".to_string()),
                header_stack: Some(vec![HeaderLayer {
                    model: "grok".to_string(),
                    response: "forty-two".to_string(),
                }]),
            }),
        };
        let answer = run_or_mock(&backend, "q", Topology::StandardChain, &[slot(0, "grok")]);
        assert_eq!(answer.content, "42");
        assert_eq!(answer.source, AnswerSource::Remote);
        assert_eq!(answer.header_stack.map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_run_empty_final_response_uses_default() {
        let backend = Canned {
            models: None,
            run: Some(RunResponse {
                final_response: Some(String::new()),
                header_stack: None,
            }),
        };
        let answer = run_or_mock(&backend, "q", Topology::StandardChain, &[slot(0, "grok")]);
        assert_eq!(answer.content, DEFAULT_FINAL_RESPONSE);
        assert!(answer.header_stack.is_none());
    }

    #[test]
    fn test_run_failure_mocks() {
        let backend = Canned {
            models: None,
            run: None,
        };
        let active = [slot(0, "grok"), slot(2, "claude")];
        let answer = run_or_mock(&backend, "hello", Topology::DoubleHelix, &active);

        assert_eq!(answer.source, AnswerSource::Mock);
        assert_eq!(answer.content, MOCK_RESPONSE);
        assert_eq!(
            answer.header_stack,
            Some(vec![
                HeaderLayer {
                    model: "Model 1".to_string(),
                    response: "[grok] hello…".to_string(),
                },
                HeaderLayer {
                    model: "Model 3".to_string(),
                    response: "[claude] hello…".to_string(),
                },
            ])
        );
    }

    #[test]
    fn test_mock_truncates_to_80_chars() {
        let prompt = "x".repeat(200);
        let answer = mock_answer(&prompt, &[slot(1, "gpt-4")]);
        let layer = answer.header_stack.unwrap_or_default();
        let expected = format!("[gpt-4] {}…", "x".repeat(80));
        assert_eq!(layer[0].response, expected);
        assert_eq!(layer[0].model, "Model 2");
    }

    #[test]
    fn test_mock_truncation_respects_char_boundaries() {
        let prompt = "é".repeat(100);
        let answer = mock_answer(&prompt, &[slot(0, "grok")]);
        let layer = answer.header_stack.unwrap_or_default();
        assert_eq!(layer[0].response.chars().filter(|&c| c == 'é').count(), 80);
    }

    #[test]
    fn test_build_request_keeps_slot_order_and_duplicates() {
        let request = build_request(
            "p",
            Topology::StarTopology,
            &[slot(0, "grok"), slot(1, "grok"), slot(3, "claude")],
        );
        assert_eq!(request.models, vec!["grok", "grok", "claude"]);
        assert_eq!(request.topology, Topology::StarTopology);
    }
}
