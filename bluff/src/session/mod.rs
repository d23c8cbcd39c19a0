//! Session ownership for hosts running many games at once.
//!
//! The engine never assumes a global registry. A host that runs one game per
//! chat, table or lobby keeps a [`SessionRegistry`] keyed however it likes
//! and dispatches every message for a session through it.
//!
//! ## Example
//!
//! ```
//! use bluff::{SessionRegistry, entities::PlayerInfo};
//!
//! let chat_id: i64 = -100;
//! let mut sessions = SessionRegistry::new(2024);
//! let game = sessions.open(chat_id).unwrap();
//! game.add_player(PlayerInfo::new(1, "Alice")).unwrap();
//! assert!(sessions.contains(&chat_id));
//! assert!(sessions.open(chat_id).is_err());
//! ```

pub mod registry;

pub use registry::{SessionError, SessionRegistry};
