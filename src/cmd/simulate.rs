use crate::reports;
use clap::Args;
use fastrand::Rng;
use m209::attack::run_attack;
use m209::config::SearchParams;
use m209::error::M209Result;
use m209::reporter::BestList;
use m209::rules::LugRules;
use m209::scorer::{EvalType, Stats};
use m209::search::SearchContext;
use m209::simulation::Simulation;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub params: SearchParams,

    /// Message length in letters.
    #[arg(short = 'l', long, default_value_t = 1500)]
    pub length: usize,

    /// Leading plaintext letters given to the attack (0 = ciphertext only).
    #[arg(long, default_value_t = 0)]
    pub crib_length: usize,

    /// Exact number of overlapping bars in the random key (0 = any).
    #[arg(long, default_value_t = 0)]
    pub overlap: usize,

    #[arg(long)]
    pub params_json: Option<String>,
}

pub fn run(args: SimulateArgs, rules: LugRules, stats: Stats) -> M209Result<()> {
    let params = super::resolve_params(&args.params, args.params_json.as_deref())?;
    let mut rng = match params.seed {
        Some(s) => Rng::with_seed(s.wrapping_add(9999)),
        None => Rng::new(),
    };

    let sim = Simulation::generate(
        &rules,
        &stats,
        &mut rng,
        args.length,
        args.crib_length,
        args.overlap,
    )?;
    let eval = if sim.crib.is_some() {
        EvalType::Crib
    } else {
        EvalType::Mono
    };
    let target = sim.target_score(eval, &stats);
    info!("🎯 Target {} score: {}", eval, target);
    reports::print_key("SECRET KEY", &sim.key);

    let key = sim.attack_key()?;
    let best = Arc::new(BestList::new(params.best_list_size));
    let ctx = SearchContext::new(rules, stats, params, best.clone()).with_target_score(Some(target));
    let summary = run_attack(Arc::new(ctx), &key, None)?;

    reports::print_summary(&summary);
    reports::print_best_list(&best.entries());
    println!("Plaintext: {}", sim.plaintext);
    Ok(())
}
