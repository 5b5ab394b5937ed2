//! Commonly used types and utilities for ease of import.

pub use crate::{
    AttackResult, Board, BoardError, Coord, EventBus, MatchCoordinator, MatchError, MatchStatus,
    MoveResult, Orientation, Player, PlayerId, Ship,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, run_interactive};
