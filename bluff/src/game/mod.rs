//! Bluff game engine.
//!
//! - Dice, hands, claims and bids
//! - The bid scoring codec that totally orders claims
//! - Seat rotation and the win check
//! - The game state machine

pub mod codec;
pub mod constants;
pub mod entities;
pub mod rotation;
pub mod state_machine;

pub use state_machine::{Game, GameError, GameSettings, GameState, GameView, PlayerView};
