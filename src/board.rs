//! Game board state: vessel placement, attack resolution and loss detection.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use log::{debug, trace};
use rand::Rng;

use crate::common::{AttackResult, BoardError, Coord, StrikeResult};
use crate::config::{BOARD_SIZE, FLEET, MAX_PLACEMENT_ATTEMPTS, NUM_SHIPS};
use crate::ship::{Orientation, Ship};

/// Serializable view of a board for syncing or display.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    pub ships: Vec<Vec<Coord>>,
    pub hits: Vec<Coord>,
    pub misses: Vec<Coord>,
    pub sunk: usize,
}

/// Main board state: ship placements, hits, misses.
#[derive(Clone, Default)]
pub struct Board {
    ships: Vec<Ship>,
    ship_coords: Vec<Coord>,
    hits: Vec<Coord>,
    misses: Vec<Coord>,
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Placed ships, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Every cell covered by a ship.
    pub fn ship_coords(&self) -> &[Coord] {
        &self.ship_coords
    }

    /// Attacks that landed, in order.
    pub fn hits(&self) -> &[Coord] {
        &self.hits
    }

    /// Attacks that missed, in order.
    pub fn misses(&self) -> &[Coord] {
        &self.misses
    }

    pub fn sunk_count(&self) -> usize {
        self.ships.iter().filter(|s| s.is_sunk()).count()
    }

    /// Place a ship of `length` at `origin` extending along `orientation`.
    ///
    /// Nothing is committed unless every cell is on the board and free.
    pub fn place(
        &mut self,
        length: usize,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let ship = Ship::new(length, origin, orientation)?;
        if ship.coordinates().iter().any(|c| !c.in_bounds()) {
            return Err(BoardError::OutOfBounds);
        }
        if ship
            .coordinates()
            .iter()
            .any(|c| self.ship_coords.contains(c))
        {
            return Err(BoardError::Overlaps);
        }
        trace!("placed {:?}", ship);
        self.ship_coords.extend_from_slice(ship.coordinates());
        self.ships.push(ship);
        Ok(())
    }

    /// Place the standard fleet at random origins and orientations, retrying
    /// each ship until it fits.
    pub fn place_fleet_randomly<R: Rng>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        if !self.ships.is_empty() {
            return Err(BoardError::BoardNotEmpty);
        }
        for &length in FLEET.iter() {
            let (origin, orientation) = self.random_placement(rng, length)?;
            self.place(length, origin, orientation)?;
        }
        debug!("placed fleet of {} ships", self.ships.len());
        if self.ships.len() == NUM_SHIPS {
            Ok(())
        } else {
            Err(BoardError::UnableToPlaceShip)
        }
    }

    /// Returns a random free (origin, orientation) for a ship of `length`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<(Coord, Orientation), BoardError> {
        let n = BOARD_SIZE as i32;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let origin = Coord::new(rng.random_range(0..n), rng.random_range(0..n));
            let orientation = Orientation::ALL[rng.random_range(0..Orientation::ALL.len())];
            let ship = Ship::new(length, origin, orientation)?;
            let fits = ship
                .coordinates()
                .iter()
                .all(|c| c.in_bounds() && !self.ship_coords.contains(c));
            if fits {
                return Ok((origin, orientation));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Process an attack at `coord`, logging fresh hits and misses.
    /// Off-board cells are ignored.
    pub fn receive_attack(&mut self, coord: Coord) -> AttackResult {
        if !coord.in_bounds() {
            debug!("attack at {} is off the board", coord);
            return AttackResult::OffBoard;
        }
        let mut result = None;
        let mut already_struck = false;
        for ship in self.ships.iter_mut() {
            match ship.strike(coord) {
                StrikeResult::Struck { remaining } => {
                    result = Some(if remaining == 0 {
                        AttackResult::Sink {
                            length: ship.length(),
                        }
                    } else {
                        AttackResult::Hit
                    });
                }
                StrikeResult::AlreadyStruck => already_struck = true,
                StrikeResult::NotOnVessel => {}
            }
        }
        let result = match result {
            Some(fresh) => {
                self.hits.push(coord);
                fresh
            }
            None if already_struck => AttackResult::AlreadyHit,
            None if self.misses.contains(&coord) => AttackResult::AlreadyMissed,
            None => {
                self.misses.push(coord);
                AttackResult::Miss
            }
        };
        debug!("attack at {} -> {:?}", coord, result);
        result
    }

    /// Returns `true` once every placed ship is sunk. An empty board has not lost.
    pub fn has_lost(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|s| s.is_sunk())
    }

    /// Fixed-width text grid, see [`crate::ui::render_grid`].
    pub fn render_grid(&self) -> String {
        crate::ui::render_grid(self)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            ships: self
                .ships
                .iter()
                .map(|s| s.coordinates().to_vec())
                .collect(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            sunk: self.sunk_count(),
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ships: {:?},\n  hits: {:?},\n  misses: {:?}\n}}",
            self.ships, self.hits, self.misses
        )
    }
}
