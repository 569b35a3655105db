pub mod loader;

use crate::error::{M209Error, M209Result};
use crate::key::{Key, CRIB_MISSING};
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub type Score = i64;

/// Score of a decryption that matches every known crib letter.
pub const CRIB_MAX_SCORE: Score = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
pub enum EvalType {
    /// Monogram log-frequencies weighted by the decryption histogram.
    Mono,
    /// Closeness of the decryption to the known plaintext.
    Crib,
}

// English letter frequencies, percent.
const ENGLISH_FREQUENCIES: [f64; 26] = [
    8.167, 1.492, 2.782, 4.253, 12.702, 2.228, 2.015, 6.094, 6.966, 0.153, 0.772, 4.025, 2.406,
    6.749, 7.507, 1.929, 0.095, 5.987, 6.327, 9.056, 2.758, 0.978, 2.360, 0.150, 1.974, 0.074,
];

/// Language statistics consumed by the scorer. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Scaled log-probability per letter, never negative.
    pub monograms: [i32; 26],
    /// Normalised letter probabilities.
    pub frequencies: [f64; 26],
}

impl Default for Stats {
    fn default() -> Self {
        Self::english()
    }
}

impl Stats {
    pub fn english() -> Self {
        Self::build(&ENGLISH_FREQUENCIES)
    }

    /// Builds statistics from 26 non-negative weights (any scale).
    pub fn from_frequencies(weights: &[f64; 26]) -> M209Result<Self> {
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) || weights.iter().sum::<f64>() <= 0.0
        {
            return Err(M209Error::Config(
                "Monogram weights must be non-negative with a positive sum".to_string(),
            ));
        }
        Ok(Self::build(weights))
    }

    fn build(weights: &[f64; 26]) -> Self {
        let total: f64 = weights.iter().sum();
        let mut frequencies = [0.0; 26];
        let mut monograms = [0; 26];
        for i in 0..26 {
            let p = weights[i] / total;
            frequencies[i] = p;
            monograms[i] = if p > 0.0 {
                (1000.0 * (p * 1e5).ln()).round().max(0.0) as i32
            } else {
                0
            };
        }
        Self {
            monograms,
            frequencies,
        }
    }

    /// Draws a letter (0..26) following the letter frequencies.
    pub fn sample_letter(&self, rng: &mut Rng) -> u8 {
        let mut x = rng.f64();
        for (i, &p) in self.frequencies.iter().enumerate() {
            if x < p {
                return i as u8;
            }
            x -= p;
        }
        25
    }
}

impl Key {
    /// Scores the current decryption, refreshing the cache first if needed.
    pub fn eval(&mut self, eval: EvalType, stats: &Stats) -> Score {
        self.evaluations += 1;
        self.update_decryption_if_invalid();
        match eval {
            EvalType::Mono => self.eval_mono(stats),
            EvalType::Crib => self.eval_crib(),
        }
    }

    fn eval_mono(&self, stats: &Stats) -> Score {
        let len = self.decryption().len();
        if len == 0 {
            return 0;
        }
        let sum: Score = self
            .histogram()
            .iter()
            .zip(stats.monograms.iter())
            .map(|(&f, &m)| f as Score * m as Score)
            .sum();
        sum / len as Score
    }

    fn eval_crib(&self) -> Score {
        debug_assert!(self.has_crib());
        let mut agreement: Score = 0;
        let mut known: Score = 0;
        for (&expected, &actual) in self.crib().iter().zip(self.decryption()) {
            if expected == CRIB_MISSING {
                continue;
            }
            let diff = (expected as i32 - actual as i32).unsigned_abs();
            let dist = diff.min(26 - diff) as Score;
            agreement += 26 - dist;
            known += 1;
        }
        if known == 0 {
            return 0;
        }
        CRIB_MAX_SCORE * agreement / (26 * known)
    }
}
