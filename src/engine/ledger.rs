//! Append-only hop ledger
//!
//! The ledger records metadata for every model invocation (a "hop") along
//! with the SHA-256 of the hop's body. Bodies themselves live in the
//! [`BodyStore`](super::BodyStore); the ledger only carries references.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Direction of a hop within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Forward pass (`F`)
    #[serde(rename = "F")]
    Forward,
    /// Return / review pass (`R`)
    #[serde(rename = "R")]
    Reverse,
}

impl Direction {
    /// Single-letter code used in the rendered ledger.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Forward => 'F',
            Self::Reverse => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Immutable record of a single hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Pass direction
    pub direction: Direction,
    /// Position of the model within the model list
    pub index: usize,
    /// Model name
    pub model: String,
    /// Lowercase hex SHA-256 of the body
    pub reference: String,
    /// When the hop was recorded
    pub timestamp: DateTime<Utc>,
}

impl LedgerEntry {
    /// Abbreviated reference shown in the rendered ledger.
    #[must_use]
    pub fn short_reference(&self) -> &str {
        self.reference.get(..8).unwrap_or(&self.reference)
    }

    /// Label such as `F0 grok`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{} {}", self.direction, self.index, self.model)
    }
}

/// Compute the content reference for a body.
#[must_use]
pub fn content_hash(body: &str) -> String {
    hex::encode(Sha256::digest(body.as_bytes()))
}

/// Packet header carrying the original prompt and the hop ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketHeader {
    original_prompt: String,
    ledger: Vec<LedgerEntry>,
}

impl PacketHeader {
    /// Start an empty ledger for a prompt.
    #[must_use]
    pub fn new(original_prompt: impl Into<String>) -> Self {
        Self {
            original_prompt: original_prompt.into(),
            ledger: Vec::new(),
        }
    }

    /// The prompt the run started from.
    #[must_use]
    pub fn original_prompt(&self) -> &str {
        &self.original_prompt
    }

    /// Recorded hops, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    /// Append a hop and return the body's reference hash.
    pub fn append(
        &mut self,
        direction: Direction,
        index: usize,
        model: impl Into<String>,
        body: &str,
    ) -> String {
        let reference = content_hash(body);
        self.ledger.push(LedgerEntry {
            direction,
            index,
            model: model.into(),
            reference: reference.clone(),
            timestamp: Utc::now(),
        });
        reference
    }

    /// Render the `<LEDGER>` block that is prepended to every hop prompt.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PacketHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<LEDGER>")?;
        writeln!(f, "Original: {}", self.original_prompt)?;
        writeln!(f)?;
        for entry in &self.ledger {
            writeln!(
                f,
                "{}{} | {} | ref:{} | {}",
                entry.direction,
                entry.index,
                entry.model,
                entry.short_reference(),
                entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
            )?;
        }
        writeln!(f, "</LEDGER>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_hash_is_sha256_hex() {
        // sha256("abc")
        assert_eq!(
            content_hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_append_returns_reference() {
        let mut header = PacketHeader::new("hello");
        let reference = header.append(Direction::Forward, 0, "grok", "abc");

        assert_eq!(reference, content_hash("abc"));
        assert_eq!(header.entries().len(), 1);
        assert_eq!(header.entries()[0].model, "grok");
        assert_eq!(header.entries()[0].direction, Direction::Forward);
        assert_eq!(header.entries()[0].short_reference(), "ba7816bf");
    }

    #[test]
    fn test_append_preserves_earlier_entries() {
        let mut header = PacketHeader::new("p");
        header.append(Direction::Forward, 0, "a", "one");
        let before = header.entries().to_vec();
        header.append(Direction::Reverse, 0, "a", "two");

        assert_eq!(&header.entries()[..1], before.as_slice());
        assert_eq!(header.entries()[1].direction, Direction::Reverse);
    }

    #[test]
    fn test_render_empty() {
        let header = PacketHeader::new("What is truth?");
        assert_eq!(
            header.render(),
            "<LEDGER>\nOriginal: What is truth?\n\n</LEDGER>\n"
        );
    }

    #[test]
    fn test_render_entries() {
        let mut header = PacketHeader::new("q");
        header.append(Direction::Forward, 1, "gpt-4", "abc");
        let rendered = header.render();

        let line = rendered.lines().nth(3).unwrap_or_default();
        assert!(line.starts_with("F1 | gpt-4 | ref:ba7816bf | "));
        assert!(line.ends_with('Z'));
        assert!(rendered.ends_with("</LEDGER>\n"));
    }

    #[test]
    fn test_entry_label() {
        let mut header = PacketHeader::new("q");
        header.append(Direction::Reverse, 2, "claude-2", "x");
        assert_eq!(header.entries()[0].label(), "R2 claude-2");
    }
}
