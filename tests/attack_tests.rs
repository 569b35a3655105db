use fastrand::Rng;
use m209::attack::{run_attack, AttackMode};
use m209::config::SearchParams;
use m209::error::M209Error;
use m209::key::Key;
use m209::machine::{bar_count, BARS};
use m209::reporter::{BestList, ResultReporter};
use m209::rules::{LugRules, RuleConfig, Version};
use m209::scorer::{EvalType, Score, Stats, CRIB_MAX_SCORE};
use m209::search::{SearchContext, Solver};
use m209::simulation::Simulation;
use std::sync::{Arc, Mutex};

/// A best list that also remembers every time its top score moved.
struct BestHistory {
    list: BestList,
    tops: Mutex<Vec<Score>>,
}

impl BestHistory {
    fn new(capacity: usize) -> Self {
        Self {
            list: BestList::new(capacity),
            tops: Mutex::new(Vec::new()),
        }
    }
}

impl ResultReporter for BestHistory {
    fn should_push(&self, score: Score) -> bool {
        self.list.should_push(score)
    }

    fn push(&self, score: Score, key: &str, plaintext: &str, comment: &str) -> bool {
        let mut tops = self.tops.lock().unwrap();
        let before = self.list.best().map(|e| e.score);
        let kept = self.list.push(score, key, plaintext, comment);
        let after = self.list.best().map(|e| e.score);
        if after != before {
            tops.extend(after);
        }
        kept
    }

    fn is_shutdown_requested(&self) -> bool {
        self.list.is_shutdown_requested()
    }
}

fn small_params(seed: u64) -> SearchParams {
    SearchParams {
        threads: 2,
        cycles: 1,
        seed: Some(seed),
        co_trials: Some(2),
        kp_trials: 20,
        kp_restarts: 0,
        lug_max_passes: 2,
        best_list_size: 5,
        ..SearchParams::default()
    }
}

fn simulation(version: Version, seed: u64, length: usize, crib: usize) -> (LugRules, Simulation) {
    let rules = LugRules::for_version(version).unwrap();
    let mut rng = Rng::with_seed(seed);
    let sim = Simulation::generate(&rules, &Stats::english(), &mut rng, length, crib, 0).unwrap();
    (rules, sim)
}

#[test]
fn test_ciphertext_only_run_reports_candidates() {
    let (rules, sim) = simulation(Version::V1947, 11, 250, 0);
    let key = sim.attack_key().unwrap();
    let best = Arc::new(BestList::new(5));
    let ctx = Arc::new(SearchContext::new(
        rules,
        Stats::english(),
        small_params(11),
        best.clone(),
    ));

    let summary = run_attack(ctx, &key, None).unwrap();
    assert_eq!(summary.mode, AttackMode::CiphertextOnly);
    assert_eq!(summary.workers, 2);
    assert!(summary.evaluations > 0);

    let entries = best.entries();
    assert!(!entries.is_empty());
    assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(entries[0].plaintext.len(), 250);
    // Diagnostics are attached because the simulated key is known.
    assert!(entries[0].comment.contains("lugs off"));
}

#[test]
fn test_known_plaintext_run_uses_the_crib() {
    let (rules, sim) = simulation(Version::V1953, 12, 200, 50);
    let key = sim.attack_key().unwrap();
    assert_eq!(AttackMode::for_key(&key), AttackMode::KnownPlaintext);

    let best = Arc::new(BestList::new(5));
    let ctx = Arc::new(SearchContext::new(
        rules,
        Stats::english(),
        small_params(12),
        best.clone(),
    ));
    let summary = run_attack(ctx, &key, None).unwrap();
    assert_eq!(summary.mode, AttackMode::KnownPlaintext);
    assert!(best.best().is_some());
}

#[test]
fn test_target_score_raises_success_and_stop() {
    let (rules, sim) = simulation(Version::V1947, 13, 150, 30);
    let target = sim.target_score(EvalType::Crib, &Stats::english());
    let ctx = SearchContext::new(
        rules,
        Stats::english(),
        small_params(13),
        Arc::new(BestList::new(3)),
    )
    .with_target_score(Some(target));
    let ctx = Arc::new(ctx);

    let mut solver = Solver::new(Arc::clone(&ctx), sim.key.clone(), Some(1), 0);
    assert!(!ctx.should_stop());
    solver.report(target - 1, "close");
    assert!(!ctx.succeeded());
    solver.report(target, "hit");
    assert!(ctx.succeeded());
    assert!(ctx.should_stop());

    // Workers started after success exit at once.
    let summary = run_attack(Arc::clone(&ctx), &sim.attack_key().unwrap(), None).unwrap();
    assert!(summary.success);
    assert_eq!(summary.evaluations, 0);
}

#[test]
fn test_reporter_shutdown_stops_workers() {
    let (rules, sim) = simulation(Version::V1942, 14, 150, 0);
    let best = Arc::new(BestList::new(3));
    best.request_shutdown();
    assert!(best.is_shutdown_requested());
    let ctx = Arc::new(SearchContext::new(
        rules,
        Stats::english(),
        small_params(14),
        best.clone(),
    ));
    let summary = run_attack(ctx, &sim.attack_key().unwrap(), None).unwrap();
    assert!(!summary.success);
    assert_eq!(summary.evaluations, 0);
    assert!(best.entries().is_empty());
}

#[test]
fn test_worker_errors_abort_the_run() {
    // Runs of one pin cannot close around an odd-sized wheel.
    let config = RuleConfig {
        max_consecutive_same_pins: 1,
        ..RuleConfig::for_version(Version::V1942)
    };
    let rules = LugRules::new(config).unwrap();
    let mut key = Key::default();
    key.set_cipher("QWERTYUIOPASDFGHJKLZXCVBNM").unwrap();

    let ctx = Arc::new(SearchContext::new(
        rules,
        Stats::english(),
        small_params(15),
        Arc::new(BestList::new(3)),
    ));
    let result = run_attack(Arc::clone(&ctx), &key, Some(AttackMode::CiphertextOnly));
    assert!(matches!(
        result,
        Err(M209Error::RandomizationExhausted { .. })
    ));
    assert!(ctx.should_stop());
}

#[test]
fn test_slide_search_rotates_the_slide() {
    let (rules, sim) = simulation(Version::V1947, 16, 120, 40);
    let params = SearchParams {
        threads: 1,
        cycles: 3,
        search_slide: true,
        kp_trials: 3,
        ..small_params(16)
    };
    let ctx = Arc::new(SearchContext::new(
        rules,
        Stats::english(),
        params,
        Arc::new(BestList::new(3)),
    ));
    let mut solver = Solver::new(ctx, sim.attack_key().unwrap(), Some(16), 0);
    solver
        .run_cycles(AttackMode::KnownPlaintext)
        .unwrap();
    assert_eq!(solver.key.slide(), 2);
    assert_eq!(bar_count(solver.key.type_count()), BARS);
}

#[test]
#[ignore = "takes minutes without optimizations; cargo test --release -- --ignored"]
fn test_known_plaintext_simulation_reaches_the_target() {
    let (rules, sim) = simulation(Version::V1947, 21, 200, 80);
    let stats = Stats::english();
    let target = sim.target_score(EvalType::Crib, &stats);
    assert_eq!(target, CRIB_MAX_SCORE);

    let history = Arc::new(BestHistory::new(10));
    let params = SearchParams {
        threads: 2,
        cycles: 10,
        seed: Some(21),
        ..SearchParams::default()
    };
    let ctx = SearchContext::new(rules, stats, params, history.clone())
        .with_target_score(Some(target));
    let summary = run_attack(Arc::new(ctx), &sim.attack_key().unwrap(), None).unwrap();

    assert_eq!(summary.mode, AttackMode::KnownPlaintext);
    assert!(summary.success);
    let best = history.list.best().unwrap();
    assert_eq!(best.score, target);

    let tops = history.tops.lock().unwrap().clone();
    assert!(tops.len() > 1, "{:?}", tops);
    assert!(tops.windows(2).all(|w| w[0] < w[1]), "{:?}", tops);
    assert_eq!(tops.last(), Some(&target));
}

#[test]
fn test_known_plaintext_mode_requires_a_crib() {
    let (rules, sim) = simulation(Version::V1947, 17, 100, 0);
    let ctx = Arc::new(SearchContext::new(
        rules,
        Stats::english(),
        small_params(17),
        Arc::new(BestList::new(3)),
    ));
    let key = sim.attack_key().unwrap();
    let result = run_attack(Arc::clone(&ctx), &key, Some(AttackMode::KnownPlaintext));
    assert!(matches!(result, Err(M209Error::Config(_))));
    assert_eq!(ctx.evaluations(), 0);

    let empty = Key::default();
    assert!(matches!(
        run_attack(ctx, &empty, None),
        Err(M209Error::Text(_))
    ));
}
