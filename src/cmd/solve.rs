use crate::reports;
use clap::Args;
use m209::attack::run_attack;
use m209::config::SearchParams;
use m209::error::{M209Error, M209Result};
use m209::key::Key;
use m209::machine::NULL_INDICATOR;
use m209::reporter::BestList;
use m209::rules::LugRules;
use m209::scorer::Stats;
use m209::search::SearchContext;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub params: SearchParams,

    /// Ciphertext letters (whitespace is ignored).
    #[arg(short = 'i', long, required_unless_present = "cipher_file")]
    pub cipher: Option<String>,

    #[arg(long, conflicts_with = "cipher")]
    pub cipher_file: Option<PathBuf>,

    /// Known plaintext aligned with the start of the message. Any
    /// non-letter marks an unknown position.
    #[arg(long)]
    pub crib: Option<String>,

    /// Message indicator (wheel positions at the first letter).
    #[arg(long, default_value = NULL_INDICATOR)]
    pub indicator: String,

    #[arg(long, default_value_t = 0)]
    pub slide: u8,

    /// JSON file with search parameters, replacing the flags above.
    #[arg(long)]
    pub params_json: Option<String>,
}

fn read_cipher(args: &SolveArgs) -> M209Result<String> {
    match (&args.cipher, &args.cipher_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => Ok(fs::read_to_string(path)?),
        (None, None) => Err(M209Error::Text("No ciphertext given".to_string())),
    }
}

pub fn run(args: SolveArgs, rules: LugRules, stats: Stats) -> M209Result<()> {
    let params = super::resolve_params(&args.params, args.params_json.as_deref())?;
    let text = read_cipher(&args)?;

    let mut key = Key::default();
    key.set_indicator(&args.indicator)?;
    key.set_slide(args.slide);
    match &args.crib {
        Some(crib) => key.set_cipher_and_crib(&text, crib)?,
        None => key.set_cipher(&text)?,
    }
    info!(
        "📜 {} cipher letters, indicator {}",
        key.cipher().len(),
        key.pins().indicator()
    );

    let best = Arc::new(BestList::new(params.best_list_size));
    let ctx = Arc::new(SearchContext::new(rules, stats, params, best.clone()));
    let summary = run_attack(ctx, &key, None)?;

    reports::print_summary(&summary);
    reports::print_best_list(&best.entries());
    Ok(())
}
