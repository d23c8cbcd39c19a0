//! Front end configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use bluff::{DEFAULT_DICE_PER_PLAYER, GameSettings};
use std::str::FromStr;

/// Most dice anyone may start with.
pub const MAX_DICE_PER_PLAYER: usize = 20;

/// Suggested raises are shown as a 4x4 keyboard at most.
pub const MAX_SUGGESTIONS: usize = 16;

const DEFAULT_SESSION: &str = "local";
const DEFAULT_SUGGESTIONS: usize = 4;

/// Complete configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Seed for the process-wide random source (OS entropy when unset)
    pub seed: Option<u64>,
    /// Dice dealt to every player at the start of a game
    pub dice_per_player: usize,
    /// Session key the terminal plays in
    pub session: String,
    /// Number of suggested raises shown after every bid
    pub suggestions: usize,
}

/// Values given on the command line, which win over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub dice_per_player: Option<usize>,
    pub session: Option<String>,
    pub suggestions: Option<usize>,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed
    pub fn from_lookup<F>(overrides: Overrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => parse_var(&lookup, "BLUFF_SEED")?,
        };

        let dice_per_player = match overrides.dice_per_player {
            Some(dice) => dice,
            None => parse_var(&lookup, "BLUFF_DICE_PER_PLAYER")?.unwrap_or(DEFAULT_DICE_PER_PLAYER),
        };

        let session = overrides
            .session
            .or_else(|| lookup("BLUFF_SESSION"))
            .unwrap_or_else(|| DEFAULT_SESSION.to_string());

        let suggestions = match overrides.suggestions {
            Some(n) => n,
            None => parse_var(&lookup, "BLUFF_SUGGESTIONS")?.unwrap_or(DEFAULT_SUGGESTIONS),
        };

        Ok(CliConfig {
            seed,
            dice_per_player,
            session,
            suggestions,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for out of range values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dice_per_player == 0 || self.dice_per_player > MAX_DICE_PER_PLAYER {
            return Err(ConfigError::Invalid {
                var: "BLUFF_DICE_PER_PLAYER".to_string(),
                reason: format!("Must be between 1 and {MAX_DICE_PER_PLAYER}"),
            });
        }

        if self.suggestions > MAX_SUGGESTIONS {
            return Err(ConfigError::Invalid {
                var: "BLUFF_SUGGESTIONS".to_string(),
                reason: format!("Must be at most {MAX_SUGGESTIONS}"),
            });
        }

        if self.session.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "BLUFF_SESSION".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn game_settings(&self) -> GameSettings {
        GameSettings::new(self.dice_per_player)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an optional variable, failing only when it's set to garbage
fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("Can't parse '{value}'"),
            })
        })
        .transpose()
}
