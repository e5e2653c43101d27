//! Stochastic content generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Whitespace the base64 decoder must ignore
const SPACES: &[u8] = b" \t\n\r\x0b\x0c";

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("YSCALAR_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    /// Returns 0, 1, 2, ... with decreasing probability
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Random byte payload, geometric length
    pub fn payload(&mut self, alpha: f64) -> Vec<u8> {
        let len = self.geometric(alpha);
        (0..len).map(|_| self.rng.gen()).collect()
    }

    /// Run of whitespace, usually empty
    pub fn spaces(&mut self) -> Vec<u8> {
        let len = self.geometric(0.2);
        (0..len)
            .map(|_| SPACES[self.rng.gen_range(0..SPACES.len())])
            .collect()
    }

    /// Copy `text` with whitespace runs before, between and after its bytes
    pub fn inject_spaces(&mut self, text: &[u8]) -> Vec<u8> {
        let mut out = self.spaces();
        for &b in text {
            out.push(b);
            out.extend(self.spaces());
        }
        out
    }

    /// Random signed integer and one of its literal spellings
    pub fn integer_literal(&mut self) -> (i64, Vec<u8>) {
        let value: i64 = match self.rng.gen_range(0..4) {
            0 => self.rng.gen_range(-100..100),
            1 => self.rng.gen(),
            2 => i64::MIN,
            _ => i64::MAX,
        };
        let sign = if value < 0 { "-" } else if self.chance(0.2) { "+" } else { "" };
        let magnitude = value.unsigned_abs();
        let text = match self.rng.gen_range(0..3) {
            0 => format!("{sign}{magnitude}"),
            1 => format!("{sign}0x{magnitude:x}"),
            // A lone zero would be read as decimal, which is the same value.
            _ => format!("{sign}0{magnitude:o}"),
        };
        (value, text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.payload(0.9), g2.payload(0.9));
            assert_eq!(g1.integer_literal(), g2.integer_literal());
        }
    }

    #[test]
    fn test_inject_spaces_keeps_symbols() {
        let mut gen = Gen::new(7);
        let spaced = gen.inject_spaces(b"QUJD");
        let kept: Vec<u8> = spaced.into_iter().filter(|b| !SPACES.contains(b)).collect();
        assert_eq!(kept, b"QUJD");
    }
}
