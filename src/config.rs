use crate::error::{M209Error, M209Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Worker threads (0 = one per available core).
    #[arg(short = 't', long, default_value_t = 0)]
    pub threads: usize,

    /// Attack cycles per worker (0 = run until stopped).
    #[arg(short = 'c', long, default_value_t = 1)]
    pub cycles: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    // === CIPHERTEXT-ONLY ===
    /// Random lug trials per cycle. Defaults to 200000 / ciphertext length.
    #[arg(long)]
    pub co_trials: Option<usize>,

    // === KNOWN-PLAINTEXT ===
    #[arg(long, default_value_t = 100)]
    pub kp_trials: usize,
    #[arg(long, default_value_t = 16)]
    pub kp_restarts: usize,

    // === ANNEALING ===
    #[arg(long, default_value_t = 150.0)]
    pub sa_start_temp_mono: f64,
    #[arg(long, default_value_t = 80.0)]
    pub sa_start_temp_crib: f64,
    /// Temperature is divided by this factor after every sweep.
    #[arg(long, default_value_t = 1.1)]
    pub sa_cooling: f64,

    // === LUG HILL CLIMBING ===
    /// Upper bound on improving passes per lug hill climb (0 = unbounded).
    #[arg(long, default_value_t = 0)]
    pub lug_max_passes: usize,

    /// Try a different slide value every cycle.
    #[arg(long, default_value_t = false)]
    pub search_slide: bool,

    #[arg(long, default_value_t = 10)]
    pub best_list_size: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            threads: 0,
            cycles: 1,
            seed: None,
            co_trials: None,
            kp_trials: 100,
            kp_restarts: 16,
            sa_start_temp_mono: 150.0,
            sa_start_temp_crib: 80.0,
            sa_cooling: 1.1,
            lug_max_passes: 0,
            search_slide: false,
            best_list_size: 10,
        }
    }
}

impl SearchParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> M209Result<Self> {
        let content = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> M209Result<()> {
        if self.sa_cooling <= 1.0 || !self.sa_cooling.is_finite() {
            return Err(M209Error::Config(format!(
                "sa_cooling must be greater than 1, got {}",
                self.sa_cooling
            )));
        }
        if self.sa_start_temp_mono < 0.0 || self.sa_start_temp_crib < 0.0 {
            return Err(M209Error::Config(
                "Annealing start temperatures must not be negative".to_string(),
            ));
        }
        if self.best_list_size == 0 {
            return Err(M209Error::Config(
                "best_list_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolved_threads(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        }
    }

    /// Phase-one trial count for a ciphertext of `len` letters.
    pub fn co_trials_for(&self, len: usize) -> usize {
        self.co_trials
            .unwrap_or_else(|| 200_000 / len.max(1))
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_co_trials_scale_with_length() {
        let params = SearchParams::default();
        assert_eq!(params.co_trials_for(1000), 200);
        assert_eq!(params.co_trials_for(1_000_000), 1);
        let fixed = SearchParams {
            co_trials: Some(3),
            ..SearchParams::default()
        };
        assert_eq!(fixed.co_trials_for(1000), 3);
    }

    #[test]
    fn test_validate_rejects_cooling_below_one() {
        let params = SearchParams {
            sa_cooling: 0.9,
            ..SearchParams::default()
        };
        assert!(params.validate().is_err());
    }
}
