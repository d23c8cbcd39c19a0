use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::{
    borrow::Borrow,
    collections::{HashMap, hash_map::Entry},
    fmt::Debug,
    hash::Hash,
};
use thiserror::Error;

use crate::game::{Game, GameSettings, GameState};

/// Session errors
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum SessionError {
    #[error("there's already a game started in this session")]
    AlreadyOpen,
    #[error("no game started in this session")]
    NotFound,
}

/// One exclusively owned [`Game`] per session key.
///
/// The registry holds the process-wide random source. It is seeded once when
/// the registry is built and every game opened afterwards draws its own
/// generator from it, so games never share mutable state.
#[derive(Debug)]
pub struct SessionRegistry<K> {
    games: HashMap<K, Game>,
    rng: StdRng,
    settings: GameSettings,
}

impl<K: Debug + Eq + Hash> SessionRegistry<K> {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Seed from operating system entropy.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    #[must_use]
    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            games: HashMap::new(),
            rng,
            settings: GameSettings::default(),
        }
    }

    /// Settings for every game opened from now on.
    #[must_use]
    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Start a new, empty game for `key`.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyOpen`] if `key` already has a game.
    pub fn open(&mut self, key: K) -> Result<&mut Game, SessionError> {
        match self.games.entry(key) {
            Entry::Occupied(_) => Err(SessionError::AlreadyOpen),
            Entry::Vacant(entry) => {
                debug!("opening session {:?}", entry.key());
                let rng = StdRng::from_rng(&mut self.rng);
                Ok(entry.insert(Game::with_settings(self.settings.clone(), rng)))
            }
        }
    }

    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&Game>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.games.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut Game>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.games.get_mut(key)
    }

    /// Discard the game for `key`, finished or not.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] if `key` has no game.
    pub fn close<Q>(&mut self, key: &Q) -> Result<Game, SessionError>
    where
        K: Borrow<Q>,
        Q: Debug + Eq + Hash + ?Sized,
    {
        let game = self.games.remove(key).ok_or(SessionError::NotFound)?;
        debug!("closed session {key:?} in state {:?}", game.state());
        Ok(game)
    }

    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.games.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.games.keys()
    }
}

impl<K: Clone + Debug + Eq + Hash> SessionRegistry<K> {
    /// Drop every finished game and return the keys that were freed.
    pub fn remove_finished(&mut self) -> Vec<K> {
        let finished: Vec<K> = self
            .games
            .iter()
            .filter(|(_, game)| game.state() == GameState::Finished)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &finished {
            self.games.remove(key);
        }
        finished
    }
}
