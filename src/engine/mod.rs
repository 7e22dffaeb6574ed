//! Local ledger engine
//!
//! An in-process stand-in for the MAIRE service. Every hop prompt carries the
//! rendered ledger of the hops before it, each response is hashed into the
//! ledger, and the full bodies are kept in a content-addressed store. The
//! models are stubs; this engine exists so the client can be exercised
//! without the real service.

mod ledger;
mod model;
mod store;

pub use ledger::{Direction, LedgerEntry, PacketHeader, content_hash};
pub use model::{Model, StubModel};
pub use store::BodyStore;

use crate::topology::Topology;
use tracing::debug;

/// Models used by `maire ledger` when none are given.
pub const DEFAULT_LEDGER_MODELS: &[&str] = &["grok-4.1", "gpt-4", "claude-2"];

/// Errors raised by the local engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A run was requested without any models
    #[error("no models selected for the run")]
    NoModels,
    /// A model failed to answer a hop
    #[error("model {model} failed: {message}")]
    ModelFailed {
        /// Name of the failing model
        model: String,
        /// Failure description
        message: String,
    },
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Ledger of every hop
    pub header: PacketHeader,
    /// Bodies referenced by the ledger
    pub store: BodyStore,
    /// Body of the last hop
    pub final_response: String,
}

impl Transcript {
    /// Per-hop `(label, body)` pairs in hop order.
    #[must_use]
    pub fn layers(&self) -> Vec<(String, String)> {
        self.header
            .entries()
            .iter()
            .map(|entry| {
                let body = self.store.get(&entry.reference).unwrap_or_default();
                (entry.label(), body.to_string())
            })
            .collect()
    }
}

/// Runs prompts through a list of models according to a topology.
pub struct Engine {
    models: Vec<Box<dyn Model>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field(
                "models",
                &self.models.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Engine {
    /// Create an engine over the given models, in order
    #[must_use]
    pub fn new(models: Vec<Box<dyn Model>>) -> Self {
        Self { models }
    }

    /// Create an engine whose models are [`StubModel`]s with the given names
    #[must_use]
    pub fn with_stubs<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(
            names
                .iter()
                .map(|name| Box::new(StubModel::new(name.as_ref())) as Box<dyn Model>)
                .collect(),
        )
    }

    /// Execute a run.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoModels`] when the engine has no models, or the
    /// first model failure encountered.
    pub fn run(&self, prompt: &str, topology: Topology) -> Result<Transcript, EngineError> {
        if self.models.is_empty() {
            return Err(EngineError::NoModels);
        }

        let mut run = Run {
            header: PacketHeader::new(prompt),
            store: BodyStore::new(),
            last: String::new(),
        };

        match topology {
            Topology::StandardChain => self.forward_pass(&mut run)?,
            Topology::DoubleHelix => {
                self.forward_pass(&mut run)?;
                self.reverse_pass(&mut run)?;
            }
            Topology::StarTopology => self.star(&mut run)?,
        }

        debug!(
            topology = topology.slug(),
            hops = run.header.entries().len(),
            "Local engine run complete"
        );

        Ok(Transcript {
            header: run.header,
            store: run.store,
            final_response: run.last,
        })
    }

    fn forward_pass(&self, run: &mut Run) -> Result<(), EngineError> {
        for (index, model) in self.models.iter().enumerate() {
            let instruction = format!("Please analyze as {}.", model.name());
            let prompt = format!("{}\n{instruction}", run.header.render());
            run.hop(Direction::Forward, index, model.as_ref(), &prompt)?;
        }
        Ok(())
    }

    fn reverse_pass(&self, run: &mut Run) -> Result<(), EngineError> {
        for (index, model) in self.models.iter().enumerate().rev() {
            let instruction = format!("Review previous responses as {}.", model.name());
            let prompt = format!("{}\n{instruction}", run.header.render());
            run.hop(Direction::Reverse, index, model.as_ref(), &prompt)?;
        }
        Ok(())
    }

    fn star(&self, run: &mut Run) -> Result<(), EngineError> {
        // Spokes all see the same hub prompt, not each other's hops
        let hub = run.header.render();
        for (index, model) in self.models.iter().enumerate() {
            let prompt = format!("{hub}\nPlease analyze as {}.", model.name());
            run.hop(Direction::Forward, index, model.as_ref(), &prompt)?;
        }

        if let Some(center) = self.models.first() {
            let prompt = format!(
                "{}\nSynthesize the responses as {}.",
                run.header.render(),
                center.name()
            );
            run.hop(Direction::Reverse, 0, center.as_ref(), &prompt)?;
        }
        Ok(())
    }
}

struct Run {
    header: PacketHeader,
    store: BodyStore,
    last: String,
}

impl Run {
    fn hop(
        &mut self,
        direction: Direction,
        index: usize,
        model: &dyn Model,
        prompt: &str,
    ) -> Result<(), EngineError> {
        let body = model.call(prompt)?;
        let reference = self.header.append(direction, index, model.name(), &body);
        let stored = self.store.insert(body.clone());
        debug_assert_eq!(reference, stored);
        self.last = body;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct FailingModel;

    impl Model for FailingModel {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn call(&self, _prompt: &str) -> Result<String, EngineError> {
            Err(EngineError::ModelFailed {
                model: "broken".to_string(),
                message: "offline".to_string(),
            })
        }
    }

    fn directions(transcript: &Transcript) -> String {
        transcript
            .header
            .entries()
            .iter()
            .map(|e| format!("{}{}", e.direction, e.index))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[rstest]
    #[case(Topology::StandardChain, "F0,F1,F2")]
    #[case(Topology::DoubleHelix, "F0,F1,F2,R2,R1,R0")]
    #[case(Topology::StarTopology, "F0,F1,F2,R0")]
    fn test_hop_order(
        #[case] topology: Topology,
        #[case] expected: &str,
    ) -> Result<(), EngineError> {
        let engine = Engine::with_stubs(DEFAULT_LEDGER_MODELS);
        let transcript = engine.run("prompt", topology)?;
        assert_eq!(directions(&transcript), expected);
        Ok(())
    }

    #[test]
    fn test_no_models_is_error() {
        let engine = Engine::with_stubs::<&str>(&[]);
        assert!(matches!(
            engine.run("p", Topology::StandardChain),
            Err(EngineError::NoModels)
        ));
    }

    #[test]
    fn test_references_resolve_in_store() -> Result<(), EngineError> {
        let engine = Engine::with_stubs(&["a", "b"]);
        let transcript = engine.run("p", Topology::DoubleHelix)?;
        for entry in transcript.header.entries() {
            let body = transcript.store.get(&entry.reference);
            assert!(body.is_some());
            assert_eq!(content_hash(body.unwrap_or_default()), entry.reference);
        }
        Ok(())
    }

    #[test]
    fn test_chain_prompts_carry_previous_hops() -> Result<(), EngineError> {
        let engine = Engine::with_stubs(&["a", "b"]);
        let transcript = engine.run("why", Topology::StandardChain)?;
        let layers = transcript.layers();

        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].0, "F0 a");
        // The second hop saw the first hop's ledger line
        assert!(layers[1].1.contains("F0 | a | ref:"));
        assert!(layers[1].1.contains("Please analyze as b."));
        assert_eq!(transcript.final_response, layers[1].1);
        Ok(())
    }

    #[test]
    fn test_star_spokes_see_only_hub() -> Result<(), EngineError> {
        let engine = Engine::with_stubs(&["a", "b", "c"]);
        let transcript = engine.run("why", Topology::StarTopology)?;
        let layers = transcript.layers();

        assert!(!layers[2].1.contains("F0 |"));
        assert_eq!(layers[3].0, "R0 a");
        assert!(layers[3].1.contains("Synthesize the responses as a."));
        assert!(layers[3].1.contains("F2 | c | ref:"));
        Ok(())
    }

    #[test]
    fn test_model_failure_propagates() {
        let engine = Engine::new(vec![Box::new(FailingModel)]);
        let result = engine.run("p", Topology::StandardChain);
        assert!(matches!(result, Err(EngineError::ModelFailed { .. })));
    }
}
