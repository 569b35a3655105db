use super::Snapshot;
use crate::error::M209Result;
use crate::scorer::{EvalType, Score, CRIB_MAX_SCORE};
use crate::search::{LugClimbOptions, LugEval, Solver};
use std::sync::Arc;
use tracing::debug;

impl Solver {
    /// One known-plaintext cycle.
    ///
    /// The best of a batch of fully random keys is refined by lug climbing,
    /// pin annealing and pin climbing on the crib score. When a round stops
    /// improving, a deeper lug climb that re-anneals the pins for every
    /// candidate is tried, and failing that the pins or the lugs are
    /// redrawn. The restart budget halves on a deep-search success and
    /// shrinks by one otherwise; the cycle ends when it runs out. A zero
    /// budget ends the cycle at the first stagnation.
    pub fn known_plaintext_cycle(&mut self, cycle: usize) -> M209Result<Score> {
        let ctx = Arc::clone(&self.ctx);
        const EVAL: EvalType = EvalType::Crib;

        let mut best: Option<Snapshot> = None;
        for _ in 0..ctx.params.kp_trials.max(1) {
            if self.should_stop() {
                break;
            }
            let type_count = ctx.rules.randomize(&mut self.rng, 0)?;
            self.key.set_type_count(&type_count);
            self.key.randomize_pins(&mut self.rng, &ctx.bounds)?;
            let score = self.key.eval(EVAL, &ctx.stats);
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(self.snapshot(score));
            }
        }
        let Some(mut best) = best else {
            return Ok(Score::MIN);
        };
        self.restore(&best);
        debug!(
            "Worker {} cycle {}: best random key {}",
            self.task_id, cycle, best.score
        );

        let options = LugClimbOptions {
            max_passes: ctx.params.lug_max_passes,
            ..LugClimbOptions::default()
        };
        let deep = LugClimbOptions {
            quick: true,
            single_iteration: true,
            max_passes: 0,
        };
        let mut restarts = ctx.params.kp_restarts;
        let mut redraw_pins = true;

        while !self.should_stop() && best.score < CRIB_MAX_SCORE {
            let after_lugs = self.hill_climb_lugs(LugEval::Key(EVAL), options)?;
            if self.should_stop() {
                break;
            }

            let pins = self.key.pins().clone();
            if self.anneal_pins(EVAL)? < after_lugs {
                self.key.set_pins(&pins);
            }
            if self.should_stop() {
                break;
            }
            let score = self.hill_climb_pins(EVAL);

            if score > best.score {
                best = self.snapshot(score);
                continue;
            }

            // Stagnation: go back to the best key and dig deeper.
            if restarts == 0 {
                break;
            }
            self.restore(&best);
            let score = self.hill_climb_lugs(LugEval::PinsAnnealing(EVAL), deep)?;
            if score > best.score {
                best = self.snapshot(score);
                restarts /= 2;
                debug!(
                    "Worker {} deep lug search reached {}, {} restarts left",
                    self.task_id, score, restarts
                );
                continue;
            }
            self.restore(&best);

            restarts -= 1;
            if restarts == 0 {
                break;
            }
            if redraw_pins {
                self.key.randomize_pins(&mut self.rng, &ctx.bounds)?;
            } else {
                let type_count = ctx.rules.randomize(&mut self.rng, 0)?;
                self.key.set_type_count(&type_count);
            }
            redraw_pins = !redraw_pins;
        }

        self.restore(&best);
        Ok(self.key.eval(EVAL, &ctx.stats))
    }
}
