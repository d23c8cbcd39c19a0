//! # Bluff
//!
//! A Liar's Dice variant where every player hides a hand of six-sided dice
//! and one face is wild.
//!
//! Players take turns raising a claim about how many dice of a face exist
//! across every hand. Instead of raising, the player whose turn it is can
//! challenge the standing claim. All hands are revealed and:
//!
//! - **High bid**: too few dice, the bidder loses the difference.
//! - **Low bid**: too many dice, the challenger loses the difference.
//! - **Exact bid**: everyone except the bidder loses one die.
//!
//! The last player with dice wins.
//!
//! ## Core Modules
//!
//! - [`game`]: Dice, the bid codec, turn rotation and the game state machine
//! - [`session`]: A registry owning one game per externally keyed session
//!
//! ## Example
//!
//! ```
//! use bluff::{Game, GameState, entities::{Bid, Dice, PlayerInfo}};
//!
//! let mut game = Game::seeded(7);
//! game.add_player(PlayerInfo::new(1, "Alice")).unwrap();
//! game.add_player(PlayerInfo::new(2, "Bob")).unwrap();
//! game.start_game().unwrap();
//!
//! game.bid(Bid::new(1, Dice::Three, 2)).unwrap();
//! let outcome = game.challenge_current_bid(2).unwrap();
//! assert_eq!(outcome.challenged_bid, Bid::new(1, Dice::Three, 2));
//! assert_ne!(game.state(), GameState::NotStarted);
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Game, GameError, GameSettings, GameState, GameView, PlayerView,
    codec::{self, Score},
    constants::{self, DEFAULT_DICE_PER_PLAYER, MIN_PLAYERS},
    entities, rotation,
};

/// Ownership of concurrently running games.
pub mod session;
pub use session::{SessionError, SessionRegistry};
