//! Local search over the two halves of the key: lug placement and pins.
//!
//! A [`Solver`] owns one [`Key`] and is driven by exactly one worker
//! thread. Everything shared between workers lives in [`SearchContext`].

pub mod anneal;
pub mod lugs;
pub mod pins;

pub use self::anneal::accept;
pub use self::lugs::{LugClimbOptions, LugEval};

use crate::config::SearchParams;
use crate::key::{Key, PinBounds};
use crate::machine::{wheel_bit, WHEELS, WHEEL_SIZES};
use crate::reporter::ResultReporter;
use crate::rules::LugRules;
use crate::scorer::{Score, Stats};
use fastrand::Rng;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Read-only inputs plus the few atomics the workers coordinate through.
pub struct SearchContext {
    pub rules: LugRules,
    pub stats: Stats,
    pub bounds: PinBounds,
    pub params: SearchParams,
    pub reporter: Arc<dyn ResultReporter>,
    /// Score of the true key, known only in simulation.
    pub target_score: Option<Score>,
    stop: AtomicBool,
    success: AtomicBool,
    evaluations: AtomicU64,
}

impl SearchContext {
    pub fn new(
        rules: LugRules,
        stats: Stats,
        params: SearchParams,
        reporter: Arc<dyn ResultReporter>,
    ) -> Self {
        let bounds = PinBounds::from_config(rules.config());
        Self {
            rules,
            stats,
            bounds,
            params,
            reporter,
            target_score: None,
            stop: AtomicBool::new(false),
            success: AtomicBool::new(false),
            evaluations: AtomicU64::new(0),
        }
    }

    pub fn with_target_score(mut self, target: Option<Score>) -> Self {
        self.target_score = target;
        self
    }

    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed) || self.reporter.is_shutdown_requested()
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// The target score was reached by some worker.
    pub fn succeeded(&self) -> bool {
        self.success.load(Ordering::SeqCst)
    }

    pub fn add_evaluations(&self, n: u64) {
        self.evaluations.fetch_add(n, Ordering::Relaxed);
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }
}

pub struct Solver {
    pub ctx: Arc<SearchContext>,
    pub key: Key,
    pub rng: Rng,
    pub task_id: usize,
    flushed_evaluations: u64,
}

impl Solver {
    pub fn new(ctx: Arc<SearchContext>, key: Key, seed: Option<u64>, task_id: usize) -> Self {
        let rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };
        Self {
            ctx,
            key,
            rng,
            task_id,
            flushed_evaluations: 0,
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.ctx.should_stop()
    }

    /// Forwards evaluations done since the last flush to the shared counter.
    pub fn flush_evaluations(&mut self) {
        let delta = self.key.evaluations - self.flushed_evaluations;
        self.ctx.add_evaluations(delta);
        self.flushed_evaluations = self.key.evaluations;
    }

    /// Offers the current key to the reporter. Reaching the target score
    /// stops every worker.
    pub fn report(&mut self, score: Score, tag: &str) {
        let ctx = Arc::clone(&self.ctx);
        if ctx.reporter.should_push(score) {
            let mut comment = format!("{} #{}", tag, self.task_id);
            let diagnostics = self.key.diagnostics();
            if !diagnostics.is_empty() {
                comment.push(' ');
                comment.push_str(&diagnostics);
            }
            ctx.reporter
                .push(score, &self.key.descriptor(), &self.key.plaintext(), &comment);
        }
        if ctx.target_score == Some(score) && !ctx.success.swap(true, Ordering::SeqCst) {
            info!(
                "🎯 Worker {} reached the target score {} after {} evaluations",
                self.task_id,
                score,
                ctx.evaluations() + self.key.evaluations - self.flushed_evaluations
            );
            ctx.request_stop();
        }
    }

    /// Checks a single-pin toggle against the count bounds.
    pub(crate) fn toggle_allowed(&self, w: usize, pos: usize) -> bool {
        let pins = self.key.pins();
        let delta: isize = if pins.get(w, pos) { -1 } else { 1 };
        let wheel = (pins.count_wheel(w) as isize + delta) as usize;
        let total = (pins.count() as isize + delta) as usize;
        self.ctx.bounds.wheel_count_ok(w, wheel) && self.ctx.bounds.total_ok(total)
    }

    /// Checks inverting the wheels in `pattern` against the count bounds.
    pub(crate) fn inversion_allowed(&self, pattern: usize) -> bool {
        let pins = self.key.pins();
        let mut total = pins.count();
        for w in 0..WHEELS {
            if wheel_bit(pattern, w) {
                let count = pins.count_wheel(w);
                let inverted = WHEEL_SIZES[w] - count;
                if !self.ctx.bounds.wheel_count_ok(w, inverted) {
                    return false;
                }
                total = total + inverted - count;
            }
        }
        self.ctx.bounds.total_ok(total)
    }
}
