use crate::reports;
use clap::Args;
use m209::error::M209Result;
use m209::rules::LugRules;

#[derive(Args, Debug, Clone)]
pub struct LugsArgs {
    /// Lexicographic order instead of the operating-manual order.
    #[arg(long, default_value_t = false)]
    pub sorted: bool,

    /// Print at most this many sequences (0 = all).
    #[arg(short = 'n', long, default_value_t = 0)]
    pub limit: usize,
}

pub fn run(args: LugsArgs, rules: &LugRules) -> M209Result<()> {
    let mut sequences = if args.sorted {
        rules.sequences().to_vec()
    } else {
        rules.sequences_sorted_for_display()
    };
    if args.limit > 0 {
        sequences.truncate(args.limit);
    }
    reports::print_sequences(rules, &sequences);
    Ok(())
}
