use super::Solver;
use crate::error::M209Result;
use crate::key::Pins;
use crate::scorer::{EvalType, Score};
use std::sync::Arc;
use tracing::debug;

// Zero-sum deltas, so the bar count is preserved.
const CHANGES_2: &[&[i8]] = &[&[-1, 1], &[1, -1], &[-2, 2], &[2, -2]];
const CHANGES_3: &[&[i8]] = &[
    &[-2, 1, 1],
    &[1, -2, 1],
    &[1, 1, -2],
    &[2, -1, -1],
    &[-1, 2, -1],
    &[-1, -1, 2],
];
const CHANGES_4: &[&[i8]] = &[
    &[-1, -1, 1, 1],
    &[-1, 1, -1, 1],
    &[-1, 1, 1, -1],
    &[1, -1, -1, 1],
    &[1, -1, 1, -1],
    &[1, 1, -1, -1],
];

/// How a lug candidate is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LugEval {
    /// Score the key with its current pins.
    Key(EvalType),
    /// Re-anneal the pins for every candidate and score the result. Much
    /// slower, used when the pins are not trusted.
    PinsAnnealing(EvalType),
}

impl LugEval {
    pub fn eval_type(self) -> EvalType {
        match self {
            LugEval::Key(e) | LugEval::PinsAnnealing(e) => e,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LugClimbOptions {
    /// Only try 2-type moves.
    pub quick: bool,
    /// Return after the first improving move.
    pub single_iteration: bool,
    /// Bound on family passes (0 = until a local optimum).
    pub max_passes: usize,
}

/// Distinct ascending `k`-subsets of `types`, zero padded to four entries.
fn type_combinations(types: &[usize], k: usize) -> Vec<[usize; 4]> {
    let n = types.len();
    let mut out = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            if k == 2 {
                out.push([types[a], types[b], 0, 0]);
                continue;
            }
            for c in b + 1..n {
                if k == 3 {
                    out.push([types[a], types[b], types[c], 0]);
                    continue;
                }
                for d in c + 1..n {
                    out.push([types[a], types[b], types[c], types[d]]);
                }
            }
        }
    }
    out
}

fn changes_for(k: usize) -> &'static [&'static [i8]] {
    match k {
        2 => CHANGES_2,
        3 => CHANGES_3,
        _ => CHANGES_4,
    }
}

impl Solver {
    /// Greedy ascent over the lug placement.
    ///
    /// Families are visited 2-type, 4-type, 3-type. A family that improves
    /// sends the search back to the 2-type family; the climb ends when a
    /// full round finds nothing. The returned score is never lower than the
    /// starting one.
    pub fn hill_climb_lugs(&mut self, eval: LugEval, opts: LugClimbOptions) -> M209Result<Score> {
        let ctx = Arc::clone(&self.ctx);
        let mut score = self.key.eval(eval.eval_type(), &ctx.stats);

        let families: &[usize] = if opts.quick { &[2] } else { &[2, 4, 3] };
        let mut family = 0;
        let mut passes = 0;

        while family < families.len() && !self.should_stop() {
            if opts.max_passes > 0 && passes >= opts.max_passes {
                break;
            }
            passes += 1;

            let (next, improved) =
                self.climb_lug_family(families[family], eval, score, opts.single_iteration)?;
            score = next;
            if improved {
                if opts.single_iteration {
                    break;
                }
                family = 0;
            } else {
                family += 1;
            }
        }

        debug!(
            "Lug climb #{} ended at {} after {} passes",
            self.task_id, score, passes
        );
        Ok(score)
    }

    /// Tries every move of one arity, keeping each improvement.
    fn climb_lug_family(
        &mut self,
        k: usize,
        eval: LugEval,
        mut score: Score,
        single_iteration: bool,
    ) -> M209Result<(Score, bool)> {
        let ctx = Arc::clone(&self.ctx);
        let combinations = type_combinations(ctx.rules.search_types(), k);
        let tag = match eval {
            LugEval::Key(_) => "HC-lugs",
            LugEval::PinsAnnealing(_) => "HC-lugs-SA",
        };
        let mut improved = false;

        for types in &combinations {
            let types = &types[..k];
            for &changes in changes_for(k) {
                let mut type_count = *self.key.type_count();
                if !ctx.rules.do_changes_if_valid(&mut type_count, types, changes) {
                    continue;
                }

                let saved_pins: Option<Pins> = match eval {
                    LugEval::PinsAnnealing(_) => Some(self.key.pins().clone()),
                    LugEval::Key(_) => None,
                };
                self.key.set_type_count(&type_count);
                let next = match eval {
                    LugEval::Key(e) => self.key.eval(e, &ctx.stats),
                    LugEval::PinsAnnealing(e) => self.anneal_pins(e)?,
                };

                if next > score {
                    score = next;
                    improved = true;
                    self.report(score, tag);
                    if single_iteration {
                        return Ok((score, true));
                    }
                } else {
                    ctx.rules.undo_changes(&mut type_count, types, changes);
                    self.key.set_type_count(&type_count);
                    if let Some(pins) = saved_pins {
                        self.key.set_pins(&pins);
                    }
                }

                if self.should_stop() {
                    return Ok((score, improved));
                }
            }
        }
        Ok((score, improved))
    }
}
