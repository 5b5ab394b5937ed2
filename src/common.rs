//! Common types for Broadside: coordinates, player ids, shot results and errors.

use core::fmt;
use core::str::FromStr;

use crate::config::BOARD_SIZE;
use crate::ship::Orientation;

/// A cell on the grid. `x` is the column, `y` the row.
///
/// Values may fall outside the board while a vessel shape is being built;
/// the board rejects such shapes at placement time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both axes lie in `[0, BOARD_SIZE)`.
    pub fn in_bounds(&self) -> bool {
        let n = BOARD_SIZE as i32;
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }

    /// Cell `steps` cells away along `orientation`, or `None` if that
    /// overflows the coordinate range.
    pub fn step(self, orientation: Orientation, steps: i32) -> Option<Self> {
        let (dx, dy) = orientation.delta();
        let x = self.x.checked_add(dx.checked_mul(steps)?)?;
        let y = self.y.checked_add(dy.checked_mul(steps)?)?;
        Some(Self::new(x, y))
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Grid label, e.g. `B7` for `(1, 6)`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            let col = (b'A' + self.x as u8) as char;
            write!(f, "{}{}", col, self.y + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

impl FromStr for Coord {
    type Err = BoardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let mut chars = input.chars();
        let col_ch = chars
            .next()
            .ok_or(BoardError::InvalidCoordinate)?
            .to_ascii_uppercase();
        if !col_ch.is_ascii_uppercase() {
            return Err(BoardError::InvalidCoordinate);
        }
        let x = (col_ch as u8 - b'A') as i32;
        let row: i32 = chars
            .as_str()
            .parse()
            .map_err(|_| BoardError::InvalidCoordinate)?;
        let row = row.checked_sub(1).ok_or(BoardError::InvalidCoordinate)?;
        let coord = Coord::new(x, row);
        if !coord.in_bounds() {
            return Err(BoardError::InvalidCoordinate);
        }
        Ok(coord)
    }
}

/// Identity token carried by every bus event. Compared by value, so a
/// player can tell its own events from its opponent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const ONE: PlayerId = PlayerId(1);
    pub const TWO: PlayerId = PlayerId(2);
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Result of striking a single vessel at a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeResult {
    /// Strike registered; `remaining` cells are still intact.
    Struck { remaining: usize },
    /// The cell belongs to the vessel but was struck before.
    AlreadyStruck,
    /// The cell is not part of this vessel.
    NotOnVessel,
}

/// Result of an attack against a whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResult {
    /// Fresh hit on an intact vessel cell.
    Hit,
    /// Fresh hit that sank a vessel of the given length.
    Sink { length: usize },
    /// Fresh miss.
    Miss,
    /// The cell was already hit. Counts as a hit, but nothing is logged.
    AlreadyHit,
    /// The cell was already missed. Nothing is logged.
    AlreadyMissed,
    /// The cell is not on the board. Nothing is logged.
    OffBoard,
}

impl AttackResult {
    /// `true` for every outcome where the shot landed on a vessel.
    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            AttackResult::Hit | AttackResult::Sink { .. } | AttackResult::AlreadyHit
        )
    }

    /// `true` when the attack changed the board.
    pub fn is_fresh(&self) -> bool {
        matches!(
            self,
            AttackResult::Hit | AttackResult::Sink { .. } | AttackResult::Miss
        )
    }
}

/// Result of a player sending a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveResult {
    /// Move recorded and published to the opponent.
    Accepted(Coord),
    /// This player already attacked the coordinate.
    Duplicate(Coord),
    /// The coordinate is not on the board; nothing was recorded.
    OutOfBounds(Coord),
}

impl MoveResult {
    pub fn coord(&self) -> Coord {
        match *self {
            MoveResult::Accepted(c) | MoveResult::Duplicate(c) | MoveResult::OutOfBounds(c) => c,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveResult::Accepted(_))
    }
}

/// Errors returned by vessel and board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Vessel length must be at least one.
    ZeroLength,
    /// Orientation name is not one of right/left/up/down.
    UnknownOrientation,
    /// Vessel would extend past the edge of the board.
    OutOfBounds,
    /// Vessel placement overlaps another vessel.
    Overlaps,
    /// Random placement gave up after too many attempts.
    UnableToPlaceShip,
    /// Fleet placement requires an empty board.
    BoardNotEmpty,
    /// Text could not be parsed as a grid label.
    InvalidCoordinate,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::ZeroLength => write!(f, "Vessel length must be positive"),
            BoardError::UnknownOrientation => {
                write!(f, "Orientation must be one of right, left, up, down")
            }
            BoardError::OutOfBounds => write!(f, "Vessel placement is out of bounds"),
            BoardError::Overlaps => write!(f, "Vessel placement overlaps with another vessel"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place vessel"),
            BoardError::BoardNotEmpty => write!(f, "Board already holds vessels"),
            BoardError::InvalidCoordinate => write!(f, "Invalid coordinate"),
        }
    }
}

impl core::error::Error for BoardError {}

/// Errors returned by player and match operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Only players 1 and 2 take part in a match.
    UnknownPlayer(u8),
    /// A loser has already been declared.
    MatchOver,
    /// The player is already wired to a bus.
    BusAlreadyConfigured,
    /// Underlying board error.
    Board(BoardError),
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::UnknownPlayer(n) => write!(f, "No player number {}", n),
            MatchError::MatchOver => write!(f, "Match is already decided"),
            MatchError::BusAlreadyConfigured => write!(f, "Player is already wired to a bus"),
            MatchError::Board(e) => write!(f, "Board error: {}", e),
        }
    }
}

impl core::error::Error for MatchError {}
