//! Ship definitions: shape built from origin, length and orientation, plus
//! per-cell strike tracking.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::common::{BoardError, Coord, StrikeResult};
use crate::config::BOARD_SIZE;

/// Direction a vessel extends from its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// +x
    Right,
    /// -x
    Left,
    /// +y
    Up,
    /// -y
    Down,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Right,
        Orientation::Left,
        Orientation::Up,
        Orientation::Down,
    ];

    /// Unit step `(dx, dy)` for this orientation.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Orientation::Right => (1, 0),
            Orientation::Left => (-1, 0),
            Orientation::Up => (0, 1),
            Orientation::Down => (0, -1),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Orientation::Right => "right",
            Orientation::Left => "left",
            Orientation::Up => "up",
            Orientation::Down => "down",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Orientation::ALL
            .into_iter()
            .find(|o| s.trim().eq_ignore_ascii_case(o.as_str()))
            .ok_or(BoardError::UnknownOrientation)
    }
}

/// A vessel on the grid.
///
/// The shape is fixed at construction. Only strikes mutate it. Apart from
/// rejecting shapes longer than the board, bounds and overlap are the
/// board's concern.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    origin: Coord,
    orientation: Orientation,
    cells: Vec<Coord>,
    struck: Vec<bool>,
}

impl Ship {
    /// Build a ship of `length` cells stepping from `origin` along `orientation`.
    pub fn new(length: usize, origin: Coord, orientation: Orientation) -> Result<Self, BoardError> {
        if length == 0 {
            return Err(BoardError::ZeroLength);
        }
        // no longer shape can ever fit on the board
        if length > BOARD_SIZE as usize {
            return Err(BoardError::OutOfBounds);
        }
        let cells: Vec<Coord> = (0..length as i32)
            .map(|i| origin.step(orientation, i))
            .collect::<Option<_>>()
            .ok_or(BoardError::OutOfBounds)?;
        Ok(Ship {
            origin,
            orientation,
            struck: alloc::vec![false; cells.len()],
            cells,
        })
    }

    /// Parse the orientation from its name first (`"right"`, `"left"`, `"up"`, `"down"`).
    pub fn from_parts(length: usize, origin: Coord, orientation: &str) -> Result<Self, BoardError> {
        Self::new(length, origin, orientation.parse()?)
    }

    pub fn length(&self) -> usize {
        self.cells.len()
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupied cells, ordered from the origin outwards.
    pub fn coordinates(&self) -> &[Coord] {
        &self.cells
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Cells that have been struck, in ship order.
    pub fn struck_coordinates(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .zip(&self.struck)
            .filter_map(|(c, hit)| hit.then_some(*c))
    }

    /// Number of intact cells.
    pub fn remaining(&self) -> usize {
        self.struck.iter().filter(|hit| !**hit).count()
    }

    /// Check if the ship is sunk (all cells struck).
    pub fn is_sunk(&self) -> bool {
        self.remaining() == 0
    }

    /// Strike the first intact cell. Returns the intact count afterwards.
    pub fn strike_next(&mut self) -> usize {
        if let Some(slot) = self.struck.iter_mut().find(|hit| !**hit) {
            *slot = true;
        }
        self.remaining()
    }

    /// Strike the cell at `coord`.
    pub fn strike(&mut self, coord: Coord) -> StrikeResult {
        let Some(idx) = self.cells.iter().position(|c| *c == coord) else {
            return StrikeResult::NotOnVessel;
        };
        if self.struck[idx] {
            return StrikeResult::AlreadyStruck;
        }
        self.struck[idx] = true;
        StrikeResult::Struck {
            remaining: self.remaining(),
        }
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ length: {}, origin: ({}, {}), orientation: {:?}, remaining: {} }}",
            self.length(),
            self.origin.x,
            self.origin.y,
            self.orientation,
            self.remaining(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strike_next_stops_at_sunk() {
        let mut ship = Ship::new(2, Coord::new(0, 0), Orientation::Up).unwrap();
        assert_eq!(ship.strike_next(), 1);
        assert_eq!(ship.strike_next(), 0);
        assert!(ship.is_sunk());
        assert_eq!(ship.strike_next(), 0);
        assert_eq!(ship.struck_coordinates().count(), 2);
    }

    #[test]
    fn strike_next_skips_struck_cells() {
        let mut ship = Ship::new(3, Coord::new(4, 4), Orientation::Left).unwrap();
        assert_eq!(ship.strike(Coord::new(4, 4)), StrikeResult::Struck { remaining: 2 });
        assert_eq!(ship.strike_next(), 1);
        assert_eq!(
            ship.struck_coordinates().collect::<Vec<_>>(),
            alloc::vec![Coord::new(4, 4), Coord::new(3, 4)]
        );
    }
}
