//! MAIRE - terminal chat client for the Multi-Anchor Immutable Reasoning Engine
//!
//! MAIRE runs several language models against one prompt in a configurable
//! topology and returns a synthesized answer along with the full per-model
//! response stack. This crate provides the chat client for that service,
//! plus a small local ledger engine used when working offline.

pub mod app;
pub mod client;
pub mod config;
pub mod engine;
pub mod paths;
pub mod topology;
pub mod tui;

pub use app::App;
pub use config::Config;
pub use topology::Topology;
