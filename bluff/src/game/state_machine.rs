//! Bluff game state machine.
//!
//! A [`Game`] moves strictly forward through `NotStarted -> Started ->
//! Finished`. Every mutation goes through one of four operations: admitting a
//! player, starting the game, bidding, and challenging the standing bid. A
//! failed operation leaves the game untouched.

use log::{debug, error, info};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::HashSet};
use thiserror::Error;

use super::constants::{DEFAULT_DICE_PER_PLAYER, MIN_PLAYERS};
use super::entities::{Bid, BidClass, ChallengeResult, Claim, Hand, Player, PlayerId, PlayerInfo};
use super::rotation::{find_next_with_dice, index_of_id, total_count};

/// Errors that can occur during game operations
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("can't add players when the game has already started")]
    WrongState,
    #[error("player already added")]
    DuplicatePlayer,
    #[error("game already started")]
    AlreadyStarted,
    #[error("at least two players are needed to play")]
    NotEnoughPlayers,
    #[error("game not started")]
    NotStarted,
    #[error("it's {name}'s turn")]
    WrongTurn { name: String },
    #[error("you must bid at least 1 dice")]
    InvalidCount,
    #[error("you must make a higher bid than the current one")]
    BidTooLow,
    #[error("no bid has been made yet")]
    NoBidYet,
    #[error("couldn't find next player")]
    NoEligiblePlayer,
    #[error("invalid game setup: {0}")]
    InvalidSetup(String),
    #[error("invalid game state: internal consistency error")]
    InternalStateError,
}

impl GameError {
    /// Whether the error means the game was driven into an impossible state.
    /// Everything else is an ordinary rule violation to show the player.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InternalStateError)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GameState {
    /// New players can still be added.
    #[default]
    NotStarted,
    /// Bids and challenges can be made.
    Started,
    /// Only one player has dice left, and they're the winner.
    Finished,
}

/// Game configuration settings
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSettings {
    pub dice_per_player: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(DEFAULT_DICE_PER_PLAYER)
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(dice_per_player: usize) -> Self {
        Self { dice_per_player }
    }
}

/// What everyone at the table may see about a player.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub info: PlayerInfo,
    pub dice_count: usize,
}

/// Public snapshot of a game. Hands are reduced to their sizes.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameView {
    pub state: GameState,
    pub players: Vec<PlayerView>,
    pub turn_idx: usize,
    pub current_bid: Option<Bid>,
    pub total_dice: usize,
}

/// One session of Bluff.
///
/// The game owns its random source; dice are only ever rolled through it, so
/// a seeded `R` makes every deal reproducible.
#[derive(Debug)]
pub struct Game<R = StdRng> {
    state: GameState,
    /// Seating order is join order and is fixed once the game starts.
    players: Vec<Player>,
    turn_idx: usize,
    /// `None` exactly when nobody has bid in the current round.
    current_bid: Option<Bid>,
    settings: GameSettings,
    rng: R,
}

impl Game<StdRng> {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Game<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self::with_settings(GameSettings::default(), rng)
    }

    #[must_use]
    pub fn with_settings(settings: GameSettings, rng: R) -> Self {
        Self {
            state: GameState::NotStarted,
            players: Vec::new(),
            turn_idx: 0,
            current_bid: None,
            settings,
            rng,
        }
    }

    /// Rebuild a started game from known hands. `settings` is kept for
    /// [`Game::settings`] and doesn't have to match the hand sizes, since
    /// hands shrink as the game goes on.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidSetup`] unless there are at least two players
    /// with unique IDs, `turn_idx` points at a player with dice, someone
    /// else also has dice, and the standing bid (if any) is a real claim
    /// made by another seated player.
    pub fn resume(
        settings: GameSettings,
        players: Vec<Player>,
        turn_idx: usize,
        current_bid: Option<Bid>,
        rng: R,
    ) -> Result<Self, GameError> {
        if players.len() < MIN_PLAYERS {
            return Err(GameError::InvalidSetup("need 2+ players".to_string()));
        }
        let mut ids = HashSet::with_capacity(players.len());
        if !players.iter().all(|player| ids.insert(player.id())) {
            return Err(GameError::InvalidSetup("duplicate player id".to_string()));
        }
        match players.get(turn_idx) {
            Some(player) if player.has_dice() => {}
            _ => {
                let reason = format!("turn index {turn_idx} doesn't point at a player with dice");
                return Err(GameError::InvalidSetup(reason));
            }
        }
        if find_next_with_dice(&players, turn_idx).is_err() {
            return Err(GameError::InvalidSetup("only one player has dice".to_string()));
        }
        if let Some(bid) = current_bid {
            if bid.claim.is_none() {
                return Err(GameError::InvalidSetup(
                    "standing bid must claim at least 1 dice".to_string(),
                ));
            }
            match index_of_id(&players, bid.player_id) {
                Some(idx) if idx != turn_idx => {}
                _ => {
                    return Err(GameError::InvalidSetup(format!(
                        "bidder {} isn't another seated player",
                        bid.player_id
                    )));
                }
            }
        }
        Ok(Self {
            state: GameState::Started,
            players,
            turn_idx,
            current_bid,
            settings,
            rng,
        })
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, idx: usize) -> Option<&Player> {
        self.players.get(idx)
    }

    #[must_use]
    pub fn player_by_id(&self, id: PlayerId) -> Option<&Player> {
        index_of_id(&self.players, id).map(|idx| &self.players[idx])
    }

    #[must_use]
    pub fn turn_idx(&self) -> usize {
        self.turn_idx
    }

    /// The player whose turn it is. `None` only before anyone has joined.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.turn_idx)
    }

    #[must_use]
    pub fn current_bid(&self) -> Option<&Bid> {
        self.current_bid.as_ref()
    }

    /// The standing claim, or [`Claim::NONE`] when nobody has bid this round.
    #[must_use]
    pub fn current_claim(&self) -> Claim {
        self.current_bid.map_or(Claim::NONE, |bid| bid.claim)
    }

    #[must_use]
    pub fn total_dice(&self) -> usize {
        self.players.iter().map(|player| player.hand().len()).sum()
    }

    /// The last player holding dice, once the game is finished.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        match self.state {
            GameState::Finished => self.current_player(),
            _ => None,
        }
    }

    #[must_use]
    pub fn view(&self) -> GameView {
        GameView {
            state: self.state,
            players: self
                .players
                .iter()
                .map(|player| PlayerView {
                    info: player.info().clone(),
                    dice_count: player.hand().len(),
                })
                .collect(),
            turn_idx: self.turn_idx,
            current_bid: self.current_bid,
            total_dice: self.total_dice(),
        }
    }

    /// Seat a new player at the end of the turn order.
    ///
    /// # Errors
    ///
    /// [`GameError::WrongState`] once the game has started and
    /// [`GameError::DuplicatePlayer`] if the ID is already seated.
    pub fn add_player(&mut self, info: PlayerInfo) -> Result<(), GameError> {
        if self.state != GameState::NotStarted {
            return Err(GameError::WrongState);
        }
        if index_of_id(&self.players, info.id).is_some() {
            return Err(GameError::DuplicatePlayer);
        }
        debug!("{} joined as player {}", info.name, self.players.len());
        self.players.push(Player::new(info));
        Ok(())
    }

    /// Deal every player a fresh hand and hand the first turn to the first
    /// player to join.
    ///
    /// # Errors
    ///
    /// [`GameError::AlreadyStarted`] unless the game hasn't started yet,
    /// [`GameError::NotEnoughPlayers`] with fewer than two players and
    /// [`GameError::InvalidSetup`] if the settings deal no dice at all.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.state != GameState::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }
        if self.settings.dice_per_player < 1 {
            return Err(GameError::InvalidSetup(
                "every player must be dealt at least 1 dice".to_string(),
            ));
        }

        self.state = GameState::Started;
        for player in &mut self.players {
            player.hand = Hand::deal(self.settings.dice_per_player, &mut self.rng);
        }
        self.turn_idx = 0;
        self.current_bid = None;
        info!(
            "game started with {} players and {} dice each",
            self.players.len(),
            self.settings.dice_per_player
        );
        Ok(())
    }

    /// Raise the standing bid and pass the turn to the next player with dice.
    ///
    /// # Errors
    ///
    /// [`GameError::NotStarted`], [`GameError::WrongTurn`],
    /// [`GameError::InvalidCount`] for a zero count, and
    /// [`GameError::BidTooLow`] unless the candidate scores strictly higher
    /// than the standing bid. [`GameError::InternalStateError`] if nobody is
    /// left to take the next turn, which a finished game should have
    /// prevented.
    pub fn bid(&mut self, candidate: Bid) -> Result<(), GameError> {
        if self.state != GameState::Started {
            return Err(GameError::NotStarted);
        }
        self.check_turn(candidate.player_id)?;
        if candidate.claim.count < 1 {
            return Err(GameError::InvalidCount);
        }
        if !candidate.claim.is_greater(&self.current_claim()) {
            return Err(GameError::BidTooLow);
        }

        let next_idx = find_next_with_dice(&self.players, self.turn_idx).map_err(|_| {
            error!(
                "no player with dice after seat {} while the game is running",
                self.turn_idx
            );
            GameError::InternalStateError
        })?;

        debug!(
            "player {} bid {}, turn passes to seat {next_idx}",
            candidate.player_id, candidate.claim
        );
        self.current_bid = Some(candidate);
        self.turn_idx = next_idx;
        Ok(())
    }

    /// Reveal every hand and settle the standing bid.
    ///
    /// The loser(s) give up dice, everyone rerolls, and the round winner
    /// starts the next round. If only one player has dice left afterwards,
    /// the game is finished.
    ///
    /// # Errors
    ///
    /// [`GameError::NotStarted`], [`GameError::WrongTurn`] and
    /// [`GameError::NoBidYet`] when there's nothing to challenge.
    pub fn challenge_current_bid(
        &mut self,
        player_id: PlayerId,
    ) -> Result<ChallengeResult, GameError> {
        if self.state != GameState::Started {
            return Err(GameError::NotStarted);
        }
        self.check_turn(player_id)?;
        let bid = match self.current_bid {
            Some(bid) if bid.claim.count >= 1 => bid,
            _ => return Err(GameError::NoBidYet),
        };
        let bidder_idx = index_of_id(&self.players, bid.player_id).ok_or_else(|| {
            error!("standing bid from unknown player {}", bid.player_id);
            GameError::InternalStateError
        })?;
        let challenger_idx = self.turn_idx;

        let actual = total_count(&self.players, bid.claim.dice);
        let claimed = bid.claim.count as usize;
        let (result, lost_dice_count) = match actual.cmp(&claimed) {
            // Bidder overclaimed, challenger starts the next round.
            Ordering::Less => {
                let lost = claimed - actual;
                self.players[bidder_idx].hand.lose(lost);
                (BidClass::HighBid, lost)
            }
            // Challenger was wrong to doubt, bidder starts the next round.
            Ordering::Greater => {
                let lost = actual - claimed;
                self.players[challenger_idx].hand.lose(lost);
                self.turn_idx = bidder_idx;
                (BidClass::LowBid, lost)
            }
            // Everyone except the bidder loses one die.
            Ordering::Equal => {
                for (idx, player) in self.players.iter_mut().enumerate() {
                    if idx != bidder_idx {
                        player.hand.lose(1);
                    }
                }
                self.turn_idx = bidder_idx;
                (BidClass::ExactBid, 1)
            }
        };

        let challenge = ChallengeResult {
            result,
            lost_dice_count,
            challenged_bid: bid,
            bidder: self.players[bidder_idx].info.clone(),
            challenger: self.players[challenger_idx].info.clone(),
        };
        info!(
            "{} challenged {}'s bid of {}: {} dice found, {result}",
            challenge.challenger, challenge.bidder, bid.claim, actual
        );

        for player in &mut self.players {
            player.hand.reroll(&mut self.rng);
        }
        self.current_bid = None;

        if find_next_with_dice(&self.players, self.turn_idx).is_err() {
            self.state = GameState::Finished;
            info!("game finished, {} wins", self.players[self.turn_idx].info);
        }

        Ok(challenge)
    }

    fn check_turn(&self, player_id: PlayerId) -> Result<(), GameError> {
        let current = &self.players[self.turn_idx];
        if current.id() == player_id {
            Ok(())
        } else {
            Err(GameError::WrongTurn {
                name: current.name().to_string(),
            })
        }
    }
}
