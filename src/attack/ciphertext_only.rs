use super::Snapshot;
use crate::error::M209Result;
use crate::scorer::{EvalType, Score};
use crate::search::{LugClimbOptions, LugEval, Solver};
use std::sync::Arc;
use tracing::debug;

impl Solver {
    /// One ciphertext-only cycle.
    ///
    /// Random lugs, each refined by one pin annealing cycle, are tried and
    /// the best is kept. Lug and pin hill climbing then alternate on the
    /// monogram score until neither improves.
    pub fn ciphertext_only_cycle(&mut self, cycle: usize) -> M209Result<Score> {
        let ctx = Arc::clone(&self.ctx);
        let trials = ctx.params.co_trials_for(self.key.cipher().len());

        let mut best: Option<Snapshot> = None;
        for _ in 0..trials {
            if self.should_stop() {
                break;
            }
            let type_count = ctx.rules.randomize(&mut self.rng, 0)?;
            self.key.set_type_count(&type_count);
            let score = self.anneal_pins(EvalType::Mono)?;
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(self.snapshot(score));
            }
        }
        let Some(best) = best else {
            return Ok(Score::MIN);
        };
        self.restore(&best);
        debug!(
            "Worker {} cycle {}: best of {} random trials {}",
            self.task_id, cycle, trials, best.score
        );

        let options = LugClimbOptions {
            max_passes: ctx.params.lug_max_passes,
            ..LugClimbOptions::default()
        };
        let mut score = best.score;
        while !self.should_stop() {
            self.hill_climb_lugs(LugEval::Key(EvalType::Mono), options)?;
            if self.should_stop() {
                break;
            }
            let next = self.hill_climb_pins(EvalType::Mono);
            if next <= score {
                break;
            }
            score = next;
        }
        Ok(score.max(self.key.eval(EvalType::Mono, &ctx.stats)))
    }
}
