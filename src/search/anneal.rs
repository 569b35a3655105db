use super::Solver;
use crate::error::M209Result;
use crate::key::Pins;
use crate::machine::{PATTERNS, WHEELS, WHEEL_SIZES};
use crate::scorer::{EvalType, Score};
use fastrand::Rng;
use std::sync::Arc;
use tracing::trace;

/// Metropolis criterion on a score change. Improvements always pass, at
/// zero temperature nothing else does.
#[inline]
pub fn accept(diff: Score, temperature: f64, rng: &mut Rng) -> bool {
    if diff > 0 {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    rng.f64() < (diff as f64 / temperature).exp()
}

/// Best state seen during one annealing cycle.
struct BestPins {
    score: Score,
    pins: Pins,
}

impl BestPins {
    #[inline]
    fn offer(&mut self, score: Score, pins: &Pins) {
        if score > self.score {
            self.score = score;
            self.pins.clone_from(pins);
        }
    }
}

impl Solver {
    /// One annealing cycle over the pins: random start, geometric cooling
    /// down to 1, then greedy sweeps at zero temperature until nothing
    /// improves. The key is left holding the best pins seen and their
    /// score is returned.
    pub fn anneal_pins(&mut self, eval: EvalType) -> M209Result<Score> {
        let ctx = Arc::clone(&self.ctx);
        let (start, cooling) = match eval {
            EvalType::Mono => (ctx.params.sa_start_temp_mono, ctx.params.sa_cooling),
            EvalType::Crib => (ctx.params.sa_start_temp_crib, ctx.params.sa_cooling),
        };

        self.key.randomize_pins(&mut self.rng, &ctx.bounds)?;
        let mut score = self.key.eval(eval, &ctx.stats);
        let mut best = BestPins {
            score,
            pins: self.key.pins().clone(),
        };

        let mut temperature = start;
        while temperature >= 1.0 {
            if self.should_stop() {
                break;
            }
            score = self.anneal_sweep(eval, temperature, score, &mut best);
            temperature /= cooling;
        }

        while !self.should_stop() {
            let next = self.anneal_sweep(eval, 0.0, score, &mut best);
            if next <= score {
                break;
            }
            score = next;
        }

        if best.score > score {
            self.key.set_pins(&best.pins);
        }
        let final_score = self.key.eval(eval, &ctx.stats);
        trace!("SA #{} finished at {}", self.task_id, final_score);
        self.report(final_score, "SA");
        Ok(final_score)
    }

    /// One pass over every pin move at `temperature`. Returns the score of
    /// the state the key is left in.
    fn anneal_sweep(
        &mut self,
        eval: EvalType,
        temperature: f64,
        mut score: Score,
        best: &mut BestPins,
    ) -> Score {
        let ctx = Arc::clone(&self.ctx);
        let max_run = ctx.bounds.max_run;

        for w in 0..WHEELS {
            for p in 0..WHEEL_SIZES[w] {
                if !self.toggle_allowed(w, p) {
                    continue;
                }
                self.key.toggle_pin(w, p);
                if self.key.pins().long_seq(w, p, max_run) {
                    self.key.toggle_pin(w, p);
                    continue;
                }
                let next = self.key.eval(eval, &ctx.stats);
                if accept(next - score, temperature, &mut self.rng) {
                    score = next;
                    best.offer(score, self.key.pins());
                } else {
                    self.key.toggle_pin(w, p);
                }
            }
        }

        for w in 0..WHEELS {
            if !self.inversion_allowed(1 << w) {
                continue;
            }
            self.key.inverse_wheel(w);
            let next = self.key.eval(eval, &ctx.stats);
            if accept(next - score, temperature, &mut self.rng) {
                score = next;
                best.offer(score, self.key.pins());
            } else {
                self.key.inverse_wheel(w);
            }
        }

        for w in 0..WHEELS {
            let size = WHEEL_SIZES[w];
            for p1 in 0..size {
                for p2 in p1 + 1..size {
                    let pins = self.key.pins();
                    if pins.get(w, p1) == pins.get(w, p2) {
                        continue;
                    }
                    self.key.toggle_pin_pair(w, p1, p2);
                    let pins = self.key.pins();
                    if pins.long_seq(w, p1, max_run) || pins.long_seq(w, p2, max_run) {
                        self.key.toggle_pin_pair(w, p1, p2);
                        continue;
                    }
                    let next = self.key.eval(eval, &ctx.stats);
                    if accept(next - score, temperature, &mut self.rng) {
                        score = next;
                        best.offer(score, self.key.pins());
                    } else {
                        self.key.toggle_pin_pair(w, p1, p2);
                    }
                }
            }
        }

        for v in 1..PATTERNS {
            if !self.inversion_allowed(v) {
                continue;
            }
            self.key.inverse_bitmap(v);
            let next = self.key.eval(eval, &ctx.stats);
            if accept(next - score, temperature, &mut self.rng) {
                score = next;
                best.offer(score, self.key.pins());
            } else {
                self.key.inverse_bitmap(v);
            }
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_improvements_and_zero_temperature() {
        let mut rng = Rng::with_seed(5);
        assert!(accept(1, 0.0, &mut rng));
        assert!(accept(1, 10.0, &mut rng));
        assert!(!accept(0, 0.0, &mut rng));
        assert!(!accept(-1, 0.0, &mut rng));
        // exp(0) == 1 so equal scores always pass above zero temperature.
        assert!(accept(0, 5.0, &mut rng));
    }

    #[test]
    fn test_accept_huge_loss_is_rejected() {
        let mut rng = Rng::with_seed(6);
        for _ in 0..1000 {
            assert!(!accept(-100_000, 1.0, &mut rng));
        }
    }
}
