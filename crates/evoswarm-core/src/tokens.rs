//! Random generators for the display-only mock tokens.
//!
//! See [`evoswarm_types::mock`] for the token types. Nothing produced here
//! is cryptographically meaningful.

use evoswarm_types::{GENOME_LENGTH, Genome, GenomeBase, MOCK_HASH_DIGITS, MockHash};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Generate a fresh random genome of [`GENOME_LENGTH`] symbols.
pub fn random_genome(rng: &mut impl Rng) -> Genome {
    Genome::from_bases(
        (0..GENOME_LENGTH).map(|_| *GenomeBase::ALL.choose(rng).unwrap_or(&GenomeBase::A)),
    )
}

/// Generate a random mock hash with the given prefix.
pub fn random_hash(prefix: &str, rng: &mut impl Rng) -> MockHash {
    MockHash::compose(
        prefix,
        (0..MOCK_HASH_DIGITS).map(|_| rng.random_range(0..16_u8)),
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn genome_has_fixed_length_and_alphabet() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let genome = random_genome(&mut rng);
            assert_eq!(genome.len(), GENOME_LENGTH);
            assert!(genome.as_str().chars().all(|c| "ATGCXY".contains(c)));
        }
    }

    #[test]
    fn hash_has_prefix_digits_and_suffix() {
        let mut rng = SmallRng::seed_from_u64(7);
        let hash = random_hash(MockHash::LEDGER_PREFIX, &mut rng);
        let raw = hash.as_str();
        assert!(raw.starts_with('G'));
        assert!(raw.ends_with("..."));
        let digits = raw
            .strip_prefix('G')
            .and_then(|s| s.strip_suffix("..."))
            .unwrap_or("");
        assert_eq!(digits.len(), MOCK_HASH_DIGITS);
        assert!(digits.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
