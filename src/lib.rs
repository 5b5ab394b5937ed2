#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
pub mod bus;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
#[cfg(feature = "std")]
mod player_cli;
pub mod prelude;
mod ship;
pub mod ui;

pub use board::*;
pub use bus::{EventBus, MoveEvent, ShotEvent};
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::*;
#[cfg(feature = "std")]
pub use player_cli::*;
pub use ship::*;
