//! Display-only mock tokens.
//!
//! The dashboard decorates agents and audit entries with strings that look
//! like ledger artifacts: genome strings, transaction hashes and "proof of
//! evolution" memos. None of them are cryptographic. They are random
//! decoration and must never be used as identifiers or for any
//! security-relevant purpose. Real identity lives in [`crate::ids`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::GenomeBase;

/// Number of symbols in an agent genome.
pub const GENOME_LENGTH: usize = 16;

/// Number of hex digits in a mock hash (before the `...` suffix).
pub const MOCK_HASH_DIGITS: usize = 8;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Fixed-length symbolic genome string (display only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct Genome(String);

impl Genome {
    /// Build a genome from a sequence of bases.
    pub fn from_bases<I>(bases: I) -> Self
    where
        I: IntoIterator<Item = GenomeBase>,
    {
        Self(bases.into_iter().map(GenomeBase::as_char).collect())
    }

    /// The genome as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols in the genome.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the genome has no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for Genome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash-looking token such as `G3fa09c1e...` (display only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct MockHash(String);

impl MockHash {
    /// Prefix used for ledger-style transaction hashes.
    pub const LEDGER_PREFIX: &'static str = "G";

    /// Compose a hash from a prefix and nibble values.
    ///
    /// Only the low four bits of each value are used.
    pub fn compose<I>(prefix: &str, nibbles: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let mut out = String::with_capacity(prefix.len() + MOCK_HASH_DIGITS + 3);
        out.push_str(prefix);
        for nibble in nibbles {
            let digit = HEX_DIGITS
                .get(usize::from(nibble & 0x0f))
                .copied()
                .unwrap_or(b'0');
            out.push(char::from(digit));
        }
        out.push_str("...");
        Self(out)
    }

    /// The hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for MockHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// "Proof of evolution" memo of the form `EVO:<genome>:GEN<n>:FIT<f>`.
///
/// Purely descriptive. It embeds a fresh genome fragment, a generation tag
/// and a fitness figure so the dashboard has something ledger-like to show.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct ProofToken(String);

impl ProofToken {
    /// Compose a proof token from its three parts.
    pub fn compose(genome: &Genome, generation_tag: u32, fitness: u32) -> Self {
        Self(format!("EVO:{genome}:GEN{generation_tag}:FIT{fitness}"))
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether `raw` has the `EVO:<16 bases>:GEN<digits>:FIT<digits>` shape.
    pub fn is_well_formed(raw: &str) -> bool {
        let mut parts = raw.split(':');
        let (Some(tag), Some(genome), Some(generation), Some(fitness), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return false;
        };

        let genome_ok = genome.chars().count() == GENOME_LENGTH
            && genome
                .chars()
                .all(|c| GenomeBase::ALL.iter().any(|b| b.as_char() == c));

        tag == "EVO"
            && genome_ok
            && is_digits_after(generation, "GEN")
            && is_digits_after(fitness, "FIT")
    }
}

fn is_digits_after(part: &str, prefix: &str) -> bool {
    part.strip_prefix(prefix)
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

impl core::fmt::Display for ProofToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
