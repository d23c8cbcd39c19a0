//! Seat-order helpers shared by turn advancing and the win check.

use super::{
    constants::MIN_PLAYERS,
    entities::{Dice, Player, PlayerId},
    state_machine::GameError,
};

/// Index of the next player after `from`, in seating order, who still holds
/// dice. `from` itself is never returned; wrapping all the way back to it,
/// or having fewer than two seats, is a [`GameError::NoEligiblePlayer`].
pub fn find_next_with_dice(players: &[Player], from: usize) -> Result<usize, GameError> {
    let n = players.len();
    if n < MIN_PLAYERS || from >= n {
        return Err(GameError::NoEligiblePlayer);
    }
    (1..n)
        .map(|step| (from + step) % n)
        .find(|&idx| players[idx].has_dice())
        .ok_or(GameError::NoEligiblePlayer)
}

#[must_use]
pub fn index_of_id(players: &[Player], id: PlayerId) -> Option<usize> {
    players.iter().position(|player| player.id() == id)
}

/// Dice matching `face` (wilds included) across every hand.
#[must_use]
pub fn total_count(players: &[Player], face: Dice) -> usize {
    players.iter().map(|player| player.hand().count(face)).sum()
}
