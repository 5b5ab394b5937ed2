//! A player: one board, its own move history, and the bus wiring that lets it
//! react to the opponent.
//!
//! `Player` is a handle. Clones share state, and the bus holds only weak
//! references, so dropping every handle retires the player even while its
//! callbacks are still subscribed.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, BoardSnapshot};
use crate::bus::{EventBus, MoveEvent, ShotEvent};
use crate::common::{AttackResult, BoardError, Coord, MatchError, MoveResult, PlayerId};
use crate::config::BOARD_SIZE;
use crate::ship::Orientation;

struct PlayerState {
    board: Board,
    moves: Vec<Coord>,
    moves_that_hit: Vec<Coord>,
    moves_that_missed: Vec<Coord>,
    bus: Option<EventBus>,
    loss_announced: bool,
    rng: SmallRng,
}

#[derive(Clone)]
pub struct Player {
    id: PlayerId,
    state: Rc<RefCell<PlayerState>>,
}

impl Player {
    /// Create a player with an empty board and no bus.
    pub fn new(id: PlayerId, rng: SmallRng) -> Self {
        Self {
            id,
            state: Rc::new(RefCell::new(PlayerState {
                board: Board::new(),
                moves: Vec::new(),
                moves_that_hit: Vec::new(),
                moves_that_missed: Vec::new(),
                bus: None,
                loss_announced: false,
                rng,
            })),
        }
    }

    pub fn with_seed(id: PlayerId, seed: u64) -> Self {
        Self::new(id, SmallRng::seed_from_u64(seed))
    }

    /// Create a player already wired to `bus`.
    pub fn connected(id: PlayerId, rng: SmallRng, bus: &EventBus) -> Self {
        let player = Self::new(id, rng);
        player.state.borrow_mut().bus = Some(bus.clone());
        player.subscribe(bus);
        player
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Store `bus` and subscribe this player's handlers to the hit, miss and
    /// move channels. Allowed once per player.
    pub fn configure_bus(&self, bus: &EventBus) -> Result<(), MatchError> {
        {
            let mut state = self.state.borrow_mut();
            if state.bus.is_some() {
                return Err(MatchError::BusAlreadyConfigured);
            }
            state.bus = Some(bus.clone());
        }
        self.subscribe(bus);
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.state.borrow().bus.is_some()
    }

    fn subscribe(&self, bus: &EventBus) {
        let id = self.id;

        let weak = Rc::downgrade(&self.state);
        bus.hits().subscribe(move |event: &ShotEvent| {
            if let Some(player) = Player::from_weak(id, &weak) {
                player.notify_hit(event.coord, event.target);
            }
        });

        let weak = Rc::downgrade(&self.state);
        bus.misses().subscribe(move |event: &ShotEvent| {
            if let Some(player) = Player::from_weak(id, &weak) {
                player.notify_miss(event.coord, event.target);
            }
        });

        let weak = Rc::downgrade(&self.state);
        bus.moves().subscribe(move |event: &MoveEvent| {
            // duplicates are bookkeeping for the sender only
            if let MoveEvent::Attack { coord, attacker } = *event {
                if let Some(player) = Player::from_weak(id, &weak) {
                    player.receive_attack(coord, attacker);
                }
            }
        });
    }

    fn from_weak(id: PlayerId, weak: &Weak<RefCell<PlayerState>>) -> Option<Player> {
        weak.upgrade().map(|state| Player { id, state })
    }

    fn bus(&self) -> Option<EventBus> {
        self.state.borrow().bus.clone()
    }

    /// Place a single ship on this player's board.
    pub fn place_ship(
        &self,
        length: usize,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        self.state
            .borrow_mut()
            .board
            .place(length, origin, orientation)
    }

    /// Place the standard fleet using this player's RNG.
    pub fn place_fleet_randomly(&self) -> Result<(), BoardError> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        state.board.place_fleet_randomly(&mut state.rng)
    }

    /// Fire at `coord`, or at a random cell when `None`.
    ///
    /// A coordinate this player already used is announced on the move
    /// channel as a duplicate and not recorded again.
    pub fn make_move(&self, coord: Option<Coord>) -> MoveResult {
        let Some(coord) = coord else {
            let n = BOARD_SIZE as i32;
            let coord = {
                let mut state = self.state.borrow_mut();
                Coord::new(state.rng.random_range(0..n), state.rng.random_range(0..n))
            };
            return self.make_move(Some(coord));
        };
        if !coord.in_bounds() {
            return MoveResult::OutOfBounds(coord);
        }

        let (duplicate, bus) = {
            let mut state = self.state.borrow_mut();
            let duplicate = state.moves.contains(&coord);
            if !duplicate {
                state.moves.push(coord);
            }
            (duplicate, state.bus.clone())
        };

        if duplicate {
            debug!("{} repeated move {}", self.id, coord);
            if let Some(bus) = bus {
                bus.moves().publish(&MoveEvent::Duplicate {
                    coord,
                    attacker: self.id,
                });
            }
            return MoveResult::Duplicate(coord);
        }

        debug!("{} fires at {}", self.id, coord);
        if let Some(bus) = bus {
            bus.moves().publish(&MoveEvent::Attack {
                coord,
                attacker: self.id,
            });
        }
        MoveResult::Accepted(coord)
    }

    /// Resolve an attack from `attacker` against this player's board.
    ///
    /// Returns `None` when `attacker` is this player, which is how a player
    /// ignores its own moves echoed back on the bus.
    pub fn receive_attack(&self, coord: Coord, attacker: PlayerId) -> Option<AttackResult> {
        if attacker == self.id {
            return None;
        }
        let result = self.state.borrow_mut().board.receive_attack(coord);
        if let Some(bus) = self.bus() {
            let event = ShotEvent {
                coord,
                target: self.id,
            };
            match result {
                AttackResult::Hit | AttackResult::Sink { .. } => {
                    bus.hits().publish(&event);
                    self.has_lost();
                }
                AttackResult::Miss => bus.misses().publish(&event),
                AttackResult::AlreadyHit
                | AttackResult::AlreadyMissed
                | AttackResult::OffBoard => {}
            }
        }
        Some(result)
    }

    /// Hit channel handler. Records `coord` as a successful move unless the
    /// hit landed on this player's own board.
    pub fn notify_hit(&self, coord: Coord, target: PlayerId) {
        if target != self.id {
            self.state.borrow_mut().moves_that_hit.push(coord);
        }
    }

    /// Miss channel handler, see [`Player::notify_hit`].
    pub fn notify_miss(&self, coord: Coord, target: PlayerId) {
        if target != self.id {
            self.state.borrow_mut().moves_that_missed.push(coord);
        }
    }

    /// `true` once every ship on this player's board is sunk. The first time
    /// this is observed with a bus configured, the loss is published.
    pub fn has_lost(&self) -> bool {
        let (lost, announce) = {
            let mut state = self.state.borrow_mut();
            let lost = state.board.has_lost();
            let announce = lost && !state.loss_announced && state.bus.is_some();
            if announce {
                state.loss_announced = true;
            }
            (lost, announce)
        };
        if announce {
            if let Some(bus) = self.bus() {
                info!("{} has lost", self.id);
                bus.losses().publish(&self.id);
            }
        }
        lost
    }

    pub fn ship_coords(&self) -> Vec<Coord> {
        self.state.borrow().board.ship_coords().to_vec()
    }

    /// Shots that hit this player's board.
    pub fn hits(&self) -> Vec<Coord> {
        self.state.borrow().board.hits().to_vec()
    }

    /// Shots that missed this player's board.
    pub fn misses(&self) -> Vec<Coord> {
        self.state.borrow().board.misses().to_vec()
    }

    /// Every coordinate this player has fired at.
    pub fn moves(&self) -> Vec<Coord> {
        self.state.borrow().moves.clone()
    }

    pub fn moves_that_hit(&self) -> Vec<Coord> {
        self.state.borrow().moves_that_hit.clone()
    }

    pub fn moves_that_missed(&self) -> Vec<Coord> {
        self.state.borrow().moves_that_missed.clone()
    }

    pub fn ship_count(&self) -> usize {
        self.state.borrow().board.ships().len()
    }

    pub fn sunk_count(&self) -> usize {
        self.state.borrow().board.sunk_count()
    }

    /// Run `f` against a read-only view of the board.
    pub fn with_board<T>(&self, f: impl FnOnce(&Board) -> T) -> T {
        f(&self.state.borrow().board)
    }

    pub fn render_grid(&self) -> String {
        self.with_board(Board::render_grid)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.with_board(Board::snapshot)
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        write!(
            f,
            "Player {{ id: {}, ships: {}, moves: {}, configured: {} }}",
            self.id.0,
            state.board.ships().len(),
            state.moves.len(),
            state.bus.is_some()
        )
    }
}
