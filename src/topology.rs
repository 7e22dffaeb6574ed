//! Orchestration topologies understood by the MAIRE engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategy the engine uses to route a prompt through the selected models.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// Models answer one after another, each seeing the ledger so far.
    StandardChain,
    /// A forward pass followed by a reverse review pass.
    DoubleHelix,
    /// Every model answers the hub prompt, then the first model synthesizes.
    #[default]
    StarTopology,
}

impl Topology {
    /// All topologies, in display order.
    pub const ALL: &'static [Self] = &[Self::StandardChain, Self::DoubleHelix, Self::StarTopology];

    /// Human-readable label shown in the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StandardChain => "Standard Chain",
            Self::DoubleHelix => "Double Helix",
            Self::StarTopology => "Star Topology",
        }
    }

    /// Wire name sent to the engine.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::StandardChain => "standard-chain",
            Self::DoubleHelix => "double-helix",
            Self::StarTopology => "star-topology",
        }
    }

    /// Optional badge rendered next to the label.
    #[must_use]
    pub const fn badge(self) -> Option<&'static str> {
        match self {
            Self::StarTopology => Some("v3"),
            Self::StandardChain | Self::DoubleHelix => None,
        }
    }

    /// Position of this topology within [`Topology::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    /// Next topology, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous topology, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = self.index().checked_sub(1).unwrap_or(Self::ALL.len() - 1);
        Self::ALL[idx]
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when parsing an unknown topology name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown topology '{0}' (expected one of: standard-chain, double-helix, star-topology)")]
pub struct ParseTopologyError(String);

impl FromStr for Topology {
    type Err = ParseTopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.slug() == normalized)
            .ok_or_else(|| ParseTopologyError(s.to_string()))
    }
}
