//! Hot-seat Bluff in a terminal.
//!
//! Every line on stdin is `NAME COMMAND...`. Names get player IDs in order of
//! first appearance and everyone shares the same screen, so private hands are
//! printed with a `[to NAME]` prefix.

use std::io::{self, BufRead, Write};

use anyhow::Error;
use bluff::SessionRegistry;
use bluff_cli::{
    bot::{Dealer, Roster, play_line},
    config::{CliConfig, Overrides},
};
use ctrlc::set_handler;
use log::{info, warn};
use pico_args::Arguments;

const HELP: &str = "\
Play Bluff at a shared terminal

USAGE:
  bluff [OPTIONS]

OPTIONS:
  --seed         N       Seed the dice for a reproducible game  [default: env BLUFF_SEED or OS entropy]
  --dice         N       Dice dealt to every player             [default: env BLUFF_DICE_PER_PLAYER or 5]
  --session      NAME    Session to play in                     [default: env BLUFF_SESSION or local]
  --suggestions  N       Suggested raises shown after each bid  [default: env BLUFF_SUGGESTIONS or 4]

FLAGS:
  -h, --help             Print help information

INPUT:
  One command per line, prefixed with the player's name:
    alice start
    alice join
    bob join
    alice begin
    alice bid 2 3
    bob challenge
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides {
        seed: pargs.opt_value_from_str("--seed")?,
        dice_per_player: pargs.opt_value_from_str("--dice")?,
        session: pargs.opt_value_from_str("--session")?,
        suggestions: pargs.opt_value_from_str("--suggestions")?,
    };
    let unused = pargs.finish();

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();
    if !unused.is_empty() {
        warn!("ignoring unused arguments: {unused:?}");
    }

    let config = CliConfig::from_env(overrides)?;
    config.validate()?;

    let sessions = match config.seed {
        Some(seed) => {
            info!("seeding dice with {seed}");
            SessionRegistry::new(seed)
        }
        None => SessionRegistry::from_os_rng(),
    }
    .with_settings(config.game_settings());
    let mut dealer = Dealer::new(sessions, config.suggestions);
    let mut roster = Roster::new();

    info!(
        "playing in session {} with {} dice each",
        config.session, config.dice_per_player
    );
    println!("Bluff is ready. Send \"NAME help\" for commands.");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in io::stdin().lock().lines() {
        for text in play_line(&mut dealer, &mut roster, &config.session, &line?) {
            writeln!(out, "{text}\n")?;
        }
        out.flush()?;
    }

    info!("input closed, {} game(s) left open", dealer.sessions().len());
    Ok(())
}
