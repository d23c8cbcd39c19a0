//! The dealer: turns player commands into game operations and messages.
//!
//! The dealer never prints anything itself. Every command produces a list of
//! [`Reply`] values, each addressed either to the whole session or privately
//! to one player, and the front end decides how to deliver them.

use bluff::{
    Game, GameError, GameState, SessionError, SessionRegistry,
    entities::{Bid, PlayerId, PlayerInfo},
};
use log::{debug, error, warn};
use std::collections::HashMap;
use thiserror::Error;

use crate::{
    commands::{Command, parse_command},
    render,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Recipient {
    /// Everyone playing in the session.
    Session,
    /// One player only, used for hands.
    Player(PlayerId),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply {
    pub to: Recipient,
    pub text: String,
}

impl Reply {
    pub fn session(text: impl Into<String>) -> Self {
        Self {
            to: Recipient::Session,
            text: text.into(),
        }
    }

    pub fn player(id: PlayerId, text: impl Into<String>) -> Self {
        Self {
            to: Recipient::Player(id),
            text: text.into(),
        }
    }
}

/// Why a command couldn't be carried out.
#[derive(Debug, Error)]
pub enum DealerError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("you haven't joined this game")]
    NotSeated,
}

impl DealerError {
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Game(err) if err.is_fatal())
    }
}

/// Runs every session's game and narrates it.
#[derive(Debug)]
pub struct Dealer {
    sessions: SessionRegistry<String>,
    suggestions: usize,
}

impl Dealer {
    /// `suggestions` is how many raises to suggest after every bid.
    #[must_use]
    pub fn new(sessions: SessionRegistry<String>, suggestions: usize) -> Self {
        Self {
            sessions,
            suggestions,
        }
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry<String> {
        &self.sessions
    }

    /// Carry out one command from `player` in `session`.
    ///
    /// Rule violations are reported back to the session as text. A game that
    /// reports an internal inconsistency is closed.
    pub fn handle(&mut self, session: &str, player: &PlayerInfo, command: Command) -> Vec<Reply> {
        debug!("{session}: {player} sent {command:?}");
        let result = match command {
            Command::Start => self.on_start(session),
            Command::Join => self.on_join(session, player),
            Command::Begin => self.on_begin(session),
            Command::Bid { count, dice } => {
                self.on_bid(session, Bid::new(player.id, dice, count), player)
            }
            Command::Challenge => self.on_challenge(session, player),
            Command::Stop => self.on_stop(session),
            Command::Hand => self.on_hand(session, player),
            Command::Status => self.on_status(session),
            Command::Help => Ok(vec![Reply::session(render::HELP)]),
        };

        result.unwrap_or_else(|err| self.report(session, &err))
    }

    /// Tell the session why a command failed, closing the game if it can't
    /// continue.
    fn report(&mut self, session: &str, err: &DealerError) -> Vec<Reply> {
        let text = render::error_message(err);
        if !err.is_fatal() {
            return vec![Reply::session(text)];
        }
        error!("{session}: closing game after {err}");
        if let Err(close_err) = self.sessions.close(session) {
            warn!("{session}: couldn't close game: {close_err}");
        }
        vec![Reply::session(format!("{text}\n\nGame ended"))]
    }

    fn game(&self, key: &str) -> Result<&Game, DealerError> {
        self.sessions
            .get(key)
            .ok_or(DealerError::Session(SessionError::NotFound))
    }

    fn game_mut(&mut self, key: &str) -> Result<&mut Game, DealerError> {
        self.sessions
            .get_mut(key)
            .ok_or(DealerError::Session(SessionError::NotFound))
    }

    fn on_start(&mut self, key: &str) -> Result<Vec<Reply>, DealerError> {
        self.sessions.open(key.to_string())?;
        Ok(vec![Reply::session(render::start_message(key))])
    }

    fn on_join(&mut self, key: &str, player: &PlayerInfo) -> Result<Vec<Reply>, DealerError> {
        self.game_mut(key)?.add_player(player.clone())?;
        Ok(vec![Reply::session(render::joined_message(&player.name))])
    }

    fn on_begin(&mut self, key: &str) -> Result<Vec<Reply>, DealerError> {
        let suggestions = self.suggestions;
        let game = self.game_mut(key)?;
        game.start_game()?;
        Ok(begin_round(key, game, render::begin_message(game), suggestions))
    }

    fn on_bid(
        &mut self,
        key: &str,
        bid: Bid,
        player: &PlayerInfo,
    ) -> Result<Vec<Reply>, DealerError> {
        let suggestions = self.suggestions;
        let game = self.game_mut(key)?;
        game.bid(bid)?;
        let text = render::bid_message(&player.name, bid.claim, game);
        Ok(vec![Reply::session(with_suggestions(text, game, suggestions))])
    }

    fn on_challenge(
        &mut self,
        key: &str,
        player: &PlayerInfo,
    ) -> Result<Vec<Reply>, DealerError> {
        let suggestions = self.suggestions;
        let game = self.game_mut(key)?;

        // Resolving the challenge rerolls every hand.
        let revealed = render::revealed_hands(game.players());
        let result = game.challenge_current_bid(player.id)?;
        let (outcome, round_winner) = render::challenge_outcome(&result);
        let text = format!("{revealed}\n{outcome}\n\n{}\n\n", render::status_message(game));

        match game.state() {
            GameState::Finished => {
                let text = text + &render::winner_message(round_winner);
                self.sessions.close(key)?;
                Ok(vec![Reply::session(text)])
            }
            _ => {
                let text = text + &render::next_round_message(game);
                Ok(begin_round(key, game, text, suggestions))
            }
        }
    }

    fn on_stop(&mut self, key: &str) -> Result<Vec<Reply>, DealerError> {
        self.sessions.close(key)?;
        Ok(vec![Reply::session("Game ended")])
    }

    fn on_hand(&self, key: &str, player: &PlayerInfo) -> Result<Vec<Reply>, DealerError> {
        let game = self.game(key)?;
        if game.state() == GameState::NotStarted {
            return Err(GameError::NotStarted.into());
        }
        let seated = game.player_by_id(player.id).ok_or(DealerError::NotSeated)?;
        Ok(vec![Reply::player(
            player.id,
            render::private_hand(key, seated.hand()),
        )])
    }

    fn on_status(&self, key: &str) -> Result<Vec<Reply>, DealerError> {
        let game = self.game(key)?;
        let mut text = render::status_message(game);
        if game.state() == GameState::Started {
            text = format!("{text}\n\n{}", render::turn_message(game));
        }
        Ok(vec![Reply::session(text)])
    }
}

/// Announce a freshly dealt round and send every player still in it their hand.
fn begin_round(key: &str, game: &Game, text: String, suggestions: usize) -> Vec<Reply> {
    let mut replies = vec![Reply::session(with_suggestions(text, game, suggestions))];
    replies.extend(
        game.players()
            .iter()
            .filter(|player| player.has_dice())
            .map(|player| Reply::player(player.id(), render::private_hand(key, player.hand()))),
    );
    replies
}

fn with_suggestions(text: String, game: &Game, n: usize) -> String {
    if n == 0 {
        return text;
    }
    format!("{text}\n\n{}", render::suggestions(game.current_claim(), n))
}

/// Hands out stable player IDs to names, in order of first appearance.
#[derive(Debug, Default)]
pub struct Roster {
    ids: HashMap<String, PlayerId>,
    names: Vec<String>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The player called `name`, registering them on first sight.
    pub fn player(&mut self, name: &str) -> PlayerInfo {
        if let Some(&id) = self.ids.get(name) {
            return PlayerInfo::new(id, name);
        }
        let id = self.next_id();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        PlayerInfo::new(id, name)
    }

    #[must_use]
    pub fn name_of(&self, id: PlayerId) -> Option<&str> {
        let idx = usize::try_from(id.checked_sub(1)?).ok()?;
        self.names.get(idx).map(String::as_str)
    }

    fn next_id(&self) -> PlayerId {
        PlayerId::try_from(self.names.len()).map_or(PlayerId::MAX, |len| len + 1)
    }
}

/// Play one `NAME COMMAND...` line and format what comes back for a shared
/// terminal. Private replies are prefixed with their recipient's name.
pub fn play_line(
    dealer: &mut Dealer,
    roster: &mut Roster,
    session: &str,
    line: &str,
) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Vec::new();
    }
    let Some((name, input)) = line.split_once(char::is_whitespace) else {
        return vec!["Usage: NAME COMMAND, e.g. \"alice join\"".to_string()];
    };
    let command = match parse_command(input) {
        Ok(command) => command,
        Err(err) => return vec![err.to_string()],
    };

    let player = roster.player(name);
    dealer
        .handle(session, &player, command)
        .into_iter()
        .map(|reply| match reply.to {
            Recipient::Session => reply.text,
            Recipient::Player(id) => {
                let name = roster.name_of(id).unwrap_or("?");
                format!("[to {name}] {}", reply.text)
            }
        })
        .collect()
}
