use super::Solver;
use crate::machine::{PATTERNS, WHEELS, WHEEL_SIZES};
use crate::scorer::{EvalType, Score};
use std::sync::Arc;

impl Solver {
    /// Greedy ascent over the pins. Each pass tries single toggles, wheel
    /// inversions, paired toggles and the best multi-wheel inversion; passes
    /// repeat while any of them improves. Never returns less than the score
    /// of the key it started from.
    pub fn hill_climb_pins(&mut self, eval: EvalType) -> Score {
        let mut score = self.key.eval(eval, &self.ctx.stats);

        loop {
            let start = score;

            score = self.climb_single_pins(eval, score);
            if self.should_stop() {
                break;
            }
            score = self.climb_wheel_inversions(eval, score);
            if self.should_stop() {
                break;
            }
            score = self.climb_pin_pairs(eval, score);
            if self.should_stop() {
                break;
            }
            score = self.climb_bitmap_inversion(eval, score);

            if score <= start || self.should_stop() {
                break;
            }
        }
        score
    }

    fn climb_single_pins(&mut self, eval: EvalType, mut score: Score) -> Score {
        let ctx = Arc::clone(&self.ctx);
        let max_run = ctx.bounds.max_run;
        for w in 0..WHEELS {
            for p in 0..WHEEL_SIZES[w] {
                if !self.toggle_allowed(w, p) {
                    continue;
                }
                self.key.toggle_pin(w, p);
                if !self.key.pins().long_seq(w, p, max_run) {
                    let next = self.key.eval(eval, &ctx.stats);
                    if next > score {
                        score = next;
                        self.report(score, "HC-pin");
                        continue;
                    }
                }
                self.key.toggle_pin(w, p);
            }
        }
        score
    }

    fn climb_wheel_inversions(&mut self, eval: EvalType, mut score: Score) -> Score {
        let ctx = Arc::clone(&self.ctx);
        for w in 0..WHEELS {
            if !self.inversion_allowed(1 << w) {
                continue;
            }
            self.key.inverse_wheel(w);
            let next = self.key.eval(eval, &ctx.stats);
            if next > score {
                score = next;
                self.report(score, "HC-inverse");
            } else {
                self.key.inverse_wheel(w);
            }
        }
        score
    }

    fn climb_pin_pairs(&mut self, eval: EvalType, mut score: Score) -> Score {
        let ctx = Arc::clone(&self.ctx);
        let max_run = ctx.bounds.max_run;
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
                    if !pins.long_seq(w, p1, max_run) && !pins.long_seq(w, p2, max_run) {
                        let next = self.key.eval(eval, &ctx.stats);
                        if next > score {
                            score = next;
                            self.report(score, "HC-pair");
                            continue;
                        }
                    }
                    self.key.toggle_pin_pair(w, p1, p2);
                }
            }
            if self.should_stop() {
                break;
            }
        }
        score
    }

    /// Tries all 63 non-empty wheel subsets and keeps the best inversion.
    fn climb_bitmap_inversion(&mut self, eval: EvalType, score: Score) -> Score {
        let ctx = Arc::clone(&self.ctx);
        let mut best: Option<(usize, Score)> = None;
        for v in 1..PATTERNS {
            if !self.inversion_allowed(v) {
                continue;
            }
            self.key.inverse_bitmap(v);
            let next = self.key.eval(eval, &ctx.stats);
            self.key.inverse_bitmap(v);
            if next > best.map_or(score, |(_, s)| s) {
                best = Some((v, next));
            }
        }

        match best {
            Some((v, _)) => {
                self.key.inverse_bitmap(v);
                let next = self.key.eval(eval, &ctx.stats);
                self.report(next, "HC-bitmap");
                next
            }
            None => score,
        }
    }
}
