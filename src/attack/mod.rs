//! Attack orchestration: the ciphertext-only and known-plaintext cycles and
//! the worker pool that runs them.

pub mod ciphertext_only;
pub mod known_plaintext;

use crate::error::{M209Error, M209Result};
use crate::key::{Key, Lugs, Pins};
use crate::scorer::Score;
use crate::search::{SearchContext, Solver};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strum_macros::Display;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AttackMode {
    #[strum(to_string = "ciphertext-only")]
    CiphertextOnly,
    #[strum(to_string = "known-plaintext")]
    KnownPlaintext,
}

impl AttackMode {
    /// A key carrying a crib is attacked with known plaintext.
    pub fn for_key(key: &Key) -> Self {
        if key.has_crib() {
            AttackMode::KnownPlaintext
        } else {
            AttackMode::CiphertextOnly
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttackSummary {
    pub mode: AttackMode,
    pub workers: usize,
    pub evaluations: u64,
    /// Some worker matched the target score exactly.
    pub success: bool,
    pub elapsed: Duration,
}

/// Lugs and pins of a key worth coming back to.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub score: Score,
    lugs: Lugs,
    pins: Pins,
}

impl Solver {
    pub(crate) fn snapshot(&self, score: Score) -> Snapshot {
        Snapshot {
            score,
            lugs: self.key.lugs().clone(),
            pins: self.key.pins().clone(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: &Snapshot) {
        self.key.set_lugs(snapshot.lugs.clone());
        self.key.set_pins(&snapshot.pins);
    }

    /// Runs the configured number of cycles (0 = until stopped).
    pub fn run_cycles(&mut self, mode: AttackMode) -> M209Result<()> {
        let cycles = self.ctx.params.cycles;
        let search_slide = self.ctx.params.search_slide;
        let mut cycle = 0;

        while (cycles == 0 || cycle < cycles) && !self.should_stop() {
            if search_slide {
                self.key.set_slide((cycle % 26) as u8);
            }
            let score = match mode {
                AttackMode::CiphertextOnly => self.ciphertext_only_cycle(cycle)?,
                AttackMode::KnownPlaintext => self.known_plaintext_cycle(cycle)?,
            };
            self.flush_evaluations();
            debug!(
                "Worker {} cycle {} ended at {} (slide {})",
                self.task_id,
                cycle,
                score,
                self.key.slide()
            );
            cycle += 1;
        }
        Ok(())
    }
}

/// Runs `mode` (derived from the key when `None`) on every worker until the
/// cycle budget is spent, the reporter asks for shutdown, or a worker hits
/// the target score. The first worker error stops the others and is
/// returned.
pub fn run_attack(
    ctx: Arc<SearchContext>,
    key: &Key,
    mode: Option<AttackMode>,
) -> M209Result<AttackSummary> {
    let mode = mode.unwrap_or_else(|| AttackMode::for_key(key));
    if key.cipher().is_empty() {
        return Err(M209Error::Text("No ciphertext to attack".to_string()));
    }
    if mode == AttackMode::KnownPlaintext && !key.has_crib() {
        return Err(M209Error::Config(
            "The known-plaintext attack needs a crib".to_string(),
        ));
    }
    let workers = ctx.params.resolved_threads();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    info!(
        "🔥 Spawning {} workers for the {} attack ({} letters, {} rules)",
        workers,
        mode,
        key.cipher().len(),
        ctx.rules.config().version
    );
    let start = Instant::now();

    let results: Vec<M209Result<()>> = pool.install(|| {
        (0..workers)
            .into_par_iter()
            .map(|i| {
                let seed = ctx.params.seed.map(|s| s + i as u64);
                let mut solver = Solver::new(Arc::clone(&ctx), key.clone(), seed, i);
                let result = solver.run_cycles(mode);
                solver.flush_evaluations();
                if let Err(e) = &result {
                    error!("❌ Worker {} failed: {}", i, e);
                    ctx.request_stop();
                }
                result
            })
            .collect()
    });

    results.into_iter().collect::<M209Result<Vec<()>>>()?;

    let summary = AttackSummary {
        mode,
        workers,
        evaluations: ctx.evaluations(),
        success: ctx.succeeded(),
        elapsed: start.elapsed(),
    };
    info!(
        "🏁 Attack finished in {:.1}s, {} evaluations{}",
        summary.elapsed.as_secs_f64(),
        summary.evaluations,
        if summary.success { ", target reached" } else { "" }
    );
    Ok(summary)
}
