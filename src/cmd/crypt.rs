use crate::reports;
use clap::Args;
use m209::error::M209Result;
use m209::key::Key;
use m209::machine::NULL_INDICATOR;
use m209::rules::LugRules;

#[derive(Args, Debug, Clone)]
pub struct CryptArgs {
    /// Lug settings, e.g. "1-2 1-4 2-5 0-1 0-3 ...".
    #[arg(long)]
    pub lugs: String,

    /// Comma separated active pin letters, one entry per wheel (or the 26
    /// rows of the manual layout).
    #[arg(long, value_delimiter = ',')]
    pub pins: Vec<String>,

    #[arg(long, default_value = NULL_INDICATOR)]
    pub indicator: String,

    #[arg(long, default_value_t = 0)]
    pub slide: u8,

    #[arg(short = 'd', long, default_value_t = false)]
    pub decrypt: bool,

    /// Reject lugs that break the lug-count rules.
    #[arg(long, default_value_t = false)]
    pub check_rules: bool,

    /// Print the key settings as a table.
    #[arg(long, default_value_t = false)]
    pub show_key: bool,

    pub text: String,
}

pub fn run(args: CryptArgs, rules: &LugRules) -> M209Result<()> {
    let mut key = Key::parse(
        &args.lugs,
        args.pins.as_slice(),
        &args.indicator,
        rules,
        args.check_rules,
    )?;
    key.set_slide(args.slide);

    if args.show_key {
        reports::print_key("KEY", &key);
    }
    println!("{}", key.encrypt_decrypt(&args.text, !args.decrypt));
    Ok(())
}
