use clap::{Parser, Subcommand};
use m209::error::M209Result;
use m209::rules::{LugRules, RuleConfig, Version};
use m209::scorer::{loader, Stats};
use std::process;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "M-209 key recovery", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Historical rule set governing lugs and pins.
    #[arg(global = true, short = 'r', long = "rules", default_value = "V1947")]
    version_rules: Version,

    /// JSON rule configuration. Takes precedence over --rules.
    #[arg(global = true, long)]
    rules_json: Option<String>,

    /// Tab-separated letter counts. Built-in English frequencies when omitted.
    #[arg(global = true, short = 'm', long)]
    monograms: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recover a key from ciphertext (known-plaintext when --crib is given).
    Solve(cmd::solve::SolveArgs),
    /// Encrypt random text with a random key and attack it.
    Simulate(cmd::simulate::SimulateArgs),
    /// List the admissible lug-count sequences of the rule set.
    Lugs(cmd::lugs::LugsArgs),
    /// Encrypt or decrypt with an explicit key.
    Crypt(cmd::crypt::CryptArgs),
}

fn load_rules(cli: &Cli) -> M209Result<LugRules> {
    let config = match &cli.rules_json {
        Some(path) => {
            info!("📂 Loading rules: {}", path);
            RuleConfig::load_from_file(path)?
        }
        None => RuleConfig::for_version(cli.version_rules),
    };
    LugRules::new(config)
}

fn load_stats(cli: &Cli) -> M209Result<Stats> {
    match &cli.monograms {
        Some(path) => loader::load_monograms(path),
        None => Ok(Stats::english()),
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    info!("🚀 Initializing M-209 solver...");

    let setup = load_rules(&cli).and_then(|rules| Ok((rules, load_stats(&cli)?)));
    let (rules, stats) = setup.unwrap_or_else(|e| {
        error!("❌ {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Solve(args) => cmd::solve::run(args, rules, stats),
        Commands::Simulate(args) => cmd::simulate::run(args, rules, stats),
        Commands::Lugs(args) => cmd::lugs::run(args, &rules),
        Commands::Crypt(args) => cmd::crypt::run(args, &rules),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
