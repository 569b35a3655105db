//! Self-test material: a random legal key, random plaintext drawn from the
//! letter statistics, and the resulting ciphertext.

use crate::error::M209Result;
use crate::key::{Key, PinBounds};
use crate::machine::{WHEELS, WHEEL_LETTERS};
use crate::rules::LugRules;
use crate::scorer::{EvalType, Score, Stats};
use fastrand::Rng;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Simulation {
    /// The secret key, with the ciphertext (and crib) attached.
    pub key: Key,
    pub plaintext: String,
    pub ciphertext: String,
    /// Leading plaintext letters handed to the attack, if any.
    pub crib: Option<String>,
}

fn random_indicator(rng: &mut Rng) -> String {
    (0..WHEELS)
        .map(|w| {
            let letters = WHEEL_LETTERS[w].as_bytes();
            letters[rng.usize(..letters.len())] as char
        })
        .collect()
}

impl Simulation {
    /// Draws a key legal under `rules` and enciphers `length` random letters
    /// with it. `required_overlap == 0` leaves the overlap count free.
    pub fn generate(
        rules: &LugRules,
        stats: &Stats,
        rng: &mut Rng,
        length: usize,
        crib_length: usize,
        required_overlap: usize,
    ) -> M209Result<Self> {
        let type_count = rules.randomize(rng, required_overlap)?;
        let mut key = Key::default();
        key.set_type_count(&type_count);
        key.set_indicator(&random_indicator(rng))?;
        key.randomize_pins(rng, &PinBounds::from_config(rules.config()))?;

        let plaintext: String = (0..length.max(1))
            .map(|_| (b'A' + stats.sample_letter(rng)) as char)
            .collect();
        let ciphertext = key.encrypt_decrypt(&plaintext, true);

        let crib = if crib_length > 0 {
            let crib: String = plaintext.chars().take(crib_length).collect();
            key.set_cipher_and_crib(&ciphertext, &crib)?;
            Some(crib)
        } else {
            key.set_cipher(&ciphertext)?;
            None
        };

        info!(
            "🎲 Simulated {} letters under {} rules, indicator {}",
            ciphertext.len(),
            rules.config().version,
            key.pins().indicator()
        );
        Ok(Self {
            key,
            plaintext,
            ciphertext,
            crib,
        })
    }

    /// A blank key for the attack: same ciphertext, crib and indicator,
    /// with the secret key attached for diagnostics.
    pub fn attack_key(&self) -> M209Result<Key> {
        let mut key = Key::default();
        key.set_indicator(&self.key.pins().indicator())?;
        match &self.crib {
            Some(crib) => key.set_cipher_and_crib(&self.ciphertext, crib)?,
            None => key.set_cipher(&self.ciphertext)?,
        }
        key.set_original(&self.key);
        Ok(key)
    }

    /// Score of the secret key under `eval`.
    pub fn target_score(&self, eval: EvalType, stats: &Stats) -> Score {
        let mut key = self.key.clone();
        key.eval(eval, stats)
    }
}
