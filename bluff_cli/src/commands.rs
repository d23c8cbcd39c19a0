use bluff::entities::{Dice, ParseDiceError};
use thiserror::Error;

/// Everything a player can ask the dealer to do.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Open a new game in the session.
    Start,
    /// Take a seat in the session's game.
    Join,
    /// Deal the first round.
    Begin,
    Bid { count: u32, dice: Dice },
    Challenge,
    /// Throw away the session's game.
    Stop,
    /// Resend the player's own hand privately.
    Hand,
    Status,
    Help,
}

/// Errors that can occur during command parsing.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    #[error("Send \"bid count dice\" command to make a bid.")]
    BidUsage,
    #[error("Invalid count: {0}")]
    InvalidCount(String),
    #[error(transparent)]
    InvalidDice(#[from] ParseDiceError),
    #[error("Unknown command: {0}. Type 'help' to see available commands")]
    UnrecognizedCommand(String),
    #[error("Empty command. Type 'help' to see available commands")]
    Empty,
}

/// Parse one line of player input into a [`Command`].
///
/// The leading `/` of chat-style commands is optional and the command word
/// is case-insensitive, so tapping a suggested `Bid 3 *️⃣` works as typed.
///
/// # Examples
///
/// ```
/// use bluff::entities::Dice;
/// use bluff_cli::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("/challenge"), Ok(Command::Challenge));
/// assert_eq!(
///     parse_command("bid 5 *"),
///     Ok(Command::Bid { count: 5, dice: Dice::Wild })
/// );
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let mut parts = input.split_whitespace();
    let Some(word) = parts.next() else {
        return Err(ParseError::Empty);
    };
    let name = word.strip_prefix('/').unwrap_or(word).to_lowercase();
    let params: Vec<&str> = parts.collect();

    match name.as_str() {
        "start" => Ok(Command::Start),
        "join" => Ok(Command::Join),
        "begin" => Ok(Command::Begin),
        "bid" => parse_bid_command(&params),
        "challenge" => Ok(Command::Challenge),
        "stop" => Ok(Command::Stop),
        "hand" => Ok(Command::Hand),
        "status" => Ok(Command::Status),
        "help" => Ok(Command::Help),
        _ => Err(ParseError::UnrecognizedCommand(word.to_string())),
    }
}

/// Parse a bid command: "bid COUNT FACE"
fn parse_bid_command(params: &[&str]) -> Result<Command, ParseError> {
    let [count, dice] = params else {
        return Err(ParseError::BidUsage);
    };
    // Zero parses fine here, the game itself rejects it.
    let count = count
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidCount(count.to_string()))?;
    let dice = dice.parse::<Dice>()?;
    Ok(Command::Bid { count, dice })
}
