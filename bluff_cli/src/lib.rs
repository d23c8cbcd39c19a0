//! Terminal front end for Bluff.
//!
//! - [`config`]: Environment and command line settings
//! - [`commands`]: Parsing player input
//! - [`bot`]: The dealer that runs games and narrates them
//! - [`render`]: Message text

pub mod bot;
pub mod commands;
pub mod config;
pub mod render;
