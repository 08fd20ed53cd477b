//! Core of the tally scoreboard: the player store, the interaction
//! controller, and the traits frontends implement to render it.

pub mod config;
pub mod controller;
pub mod error;
pub mod game_state;
pub mod guards;
pub mod input;
pub mod view;
