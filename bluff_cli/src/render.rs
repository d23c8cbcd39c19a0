//! Text the dealer sends to the table and to individual players.

use bluff::{
    Game,
    entities::{BidClass, ChallengeResult, Claim, Hand, Player},
};
use std::fmt::{self, Write};

pub const GAME_NAME: &str = "Bluff";

/// Suggested raises are laid out in rows of this many.
const SUGGESTIONS_PER_ROW: usize = 4;

pub const HELP: &str = "\
Commands (the leading / is optional):
  start              Open a new game in this session
  join               Take a seat before the game begins
  begin              Deal the first round
  bid COUNT FACE     Raise the standing bid, FACE is * (wild) or 1-5
  challenge          Call the standing bid a bluff
  hand               Show your hand again
  status             Show how many dice everyone has
  stop               End the game
  help               Show this message";

/// Engine errors start lowercase; shown to players they read as sentences.
pub fn error_message(err: &impl fmt::Display) -> String {
    let text = err.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[must_use]
pub fn start_message(session: &str) -> String {
    format!(
        "Starting a new game of {GAME_NAME} in {session}! \
         Send join to take a seat. Once everyone has joined, send begin to begin the game."
    )
}

#[must_use]
pub fn joined_message(name: &str) -> String {
    format!("{name} joined")
}

#[must_use]
pub fn begin_message(game: &Game) -> String {
    format!(
        "The game begins. All the players should have now received their first round hand \
         from me as a private message.\n\n\
         Send \"bid count dice\" command to make a bid. Use \"*\" for wild. For example, to \
         make a bid of five wilds, send command \"bid 5 *\".\n\n\
         Send challenge command to challenge current bid.\n\n{}",
        turn_message(game)
    )
}

#[must_use]
pub fn turn_message(game: &Game) -> String {
    match game.current_player() {
        Some(player) => format!("It's {}'s turn.", player.name()),
        None => String::new(),
    }
}

#[must_use]
pub fn bid_message(name: &str, claim: Claim, game: &Game) -> String {
    format!(
        "{name} bid {} {}s. {}",
        claim.count,
        claim.dice,
        turn_message(game)
    )
}

#[must_use]
pub fn private_hand(session: &str, hand: &Hand) -> String {
    format!("Your {GAME_NAME} hand in {session}:\n{hand}")
}

/// Every hand that still holds dice, one per line.
#[must_use]
pub fn revealed_hands(players: &[Player]) -> String {
    players
        .iter()
        .filter(|player| player.has_dice())
        .fold(String::new(), |mut out, player| {
            let _ = writeln!(out, "{}: {}", player.name(), player.hand());
            out
        })
}

/// What happened to whom, plus the name of the player who won the round.
#[must_use]
pub fn challenge_outcome(result: &ChallengeResult) -> (String, &str) {
    let bidder = result.bidder.name.as_str();
    let challenger = result.challenger.name.as_str();
    let lost = result.lost_dice_count;
    match result.result {
        BidClass::LowBid => (
            format!("{bidder}'s bid was good. {challenger} loses {lost} dice."),
            bidder,
        ),
        BidClass::ExactBid => (
            format!("{bidder}'s bid was exactly right! Everyone else loses {lost} dice."),
            bidder,
        ),
        BidClass::HighBid => (
            format!("{bidder}'s bid was too high. {bidder} loses {lost} dice."),
            challenger,
        ),
    }
}

#[must_use]
pub fn status_message(game: &Game) -> String {
    let mut msg = String::from("Game status:");
    for player in game.players() {
        let _ = write!(msg, "\n{} {} dice", player.name(), player.hand().len());
    }
    let _ = write!(msg, "\nTotal {} dice", game.total_dice());
    msg
}

#[must_use]
pub fn next_round_message(game: &Game) -> String {
    format!("Starting next round. {}", turn_message(game))
}

#[must_use]
pub fn winner_message(winner: &str) -> String {
    format!("Game finished! {winner} is the winner!")
}

#[must_use]
pub fn bid_button(claim: Claim) -> String {
    format!("Bid {} {}", claim.count, claim.dice)
}

/// The `n` lowest raises over `current`, laid out like a button keyboard.
#[must_use]
pub fn suggestions(current: Claim, n: usize) -> String {
    let buttons: Vec<String> = current.suggestions().take(n).map(bid_button).collect();
    buttons
        .chunks(SUGGESTIONS_PER_ROW)
        .map(|row| row.join(" | "))
        .collect::<Vec<_>>()
        .join("\n")
}
