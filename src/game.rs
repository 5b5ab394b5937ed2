use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use log::{debug, info, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{
    bus::{EventBus, MoveEvent, ShotEvent},
    common::{Coord, MatchError, MoveResult, PlayerId},
    config::BOARD_SIZE,
    player::Player,
    ship::Orientation,
    ui,
};

/// Current status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchStatus {
    InProgress,
    Finished { winner: PlayerId, loser: PlayerId },
}

/// Bus traffic observed by the coordinator, in publish order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchEvent {
    Hit { target: PlayerId, coord: Coord },
    Miss { target: PlayerId, coord: Coord },
    Loss { player: PlayerId },
}

/// Moves fired during one call to [`MatchCoordinator::make_move`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub moves: Vec<(PlayerId, MoveResult)>,
    pub status: MatchStatus,
}

/// Serializable end-of-match report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSummary {
    pub status: MatchStatus,
    pub winner: Option<PlayerId>,
    pub loser: Option<PlayerId>,
    /// Moves fired by player 1 and player 2.
    pub shots: [usize; 2],
    /// Moves that landed, per attacking player.
    pub hits: [usize; 2],
    /// Enemy ships each player has sunk.
    pub ships_sunk: [usize; 2],
}

/// Owns both players of a match, wires them to one bus and tracks the loser.
pub struct MatchCoordinator {
    bus: EventBus,
    players: [Player; 2],
    loser: Rc<Cell<Option<PlayerId>>>,
    history: Rc<RefCell<Vec<MatchEvent>>>,
    rng: SmallRng,
}

impl MatchCoordinator {
    /// Create a match whose randomness is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        let bus = EventBus::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let players = fresh_players(&mut rng, &bus);
        let coordinator = Self {
            bus,
            players,
            loser: Rc::new(Cell::new(None)),
            history: Rc::new(RefCell::new(Vec::new())),
            rng,
        };
        coordinator.subscribe();
        coordinator
    }

    /// Start over: clear the bus, replace both players with fresh ones and
    /// re-subscribe everything.
    pub fn reset(&mut self) {
        self.bus.reset();
        self.players = fresh_players(&mut self.rng, &self.bus);
        self.loser.set(None);
        self.history.borrow_mut().clear();
        self.subscribe();
        debug!("match reset");
    }

    fn subscribe(&self) {
        let loser = self.loser.clone();
        let history = self.history.clone();
        self.bus.losses().subscribe(move |player: &PlayerId| {
            history.borrow_mut().push(MatchEvent::Loss { player: *player });
            if loser.get().is_none() {
                info!("{} has no ships left", player);
                loser.set(Some(*player));
            }
        });

        let history = self.history.clone();
        self.bus.hits().subscribe(move |event: &ShotEvent| {
            history.borrow_mut().push(MatchEvent::Hit {
                target: event.target,
                coord: event.coord,
            });
        });

        let history = self.history.clone();
        self.bus.misses().subscribe(move |event: &ShotEvent| {
            history.borrow_mut().push(MatchEvent::Miss {
                target: event.target,
                coord: event.coord,
            });
        });

        self.bus.moves().subscribe(|event: &MoveEvent| trace!("move: {:?}", event));
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Player by number (1 or 2).
    pub fn player(&self, number: u8) -> Result<&Player, MatchError> {
        match number {
            1 => Ok(&self.players[0]),
            2 => Ok(&self.players[1]),
            n => Err(MatchError::UnknownPlayer(n)),
        }
    }

    /// Place the standard fleet for both players.
    pub fn place_ships_randomly(&self) -> Result<(), MatchError> {
        for player in &self.players {
            player.place_fleet_randomly()?;
        }
        Ok(())
    }

    pub fn place_ship(
        &self,
        length: usize,
        origin: Coord,
        orientation: Orientation,
        number: u8,
    ) -> Result<(), MatchError> {
        self.player(number)?
            .place_ship(length, origin, orientation)
            .map_err(MatchError::from)
    }

    pub fn ships(&self, number: u8) -> Result<Vec<Coord>, MatchError> {
        Ok(self.player(number)?.ship_coords())
    }

    /// Fire `coord` for player `number`, then let the automated side play.
    ///
    /// Player 1 always fires at `coord` and player 2 always answers with a
    /// random move; when `number` is 2, player 2 fires at `coord` first. This
    /// is what drives the computer opponent in single-player games.
    pub fn make_move(&self, coord: Coord, number: u8) -> Result<Turn, MatchError> {
        if self.loser().is_some() {
            return Err(MatchError::MatchOver);
        }
        let mut moves = Vec::with_capacity(3);
        match number {
            1 => {}
            2 => moves.push((PlayerId::TWO, self.players[1].make_move(Some(coord)))),
            n => return Err(MatchError::UnknownPlayer(n)),
        }
        moves.push((PlayerId::ONE, self.players[0].make_move(Some(coord))));
        moves.push((PlayerId::TWO, self.players[1].make_move(None)));
        Ok(Turn {
            moves,
            status: self.status(),
        })
    }

    /// Play player 1 at random untried cells until the match is decided or
    /// player 1 has fired at every cell.
    pub fn play_automated(&mut self) -> Result<MatchStatus, MatchError> {
        while self.loser().is_none() {
            let untried = untried_cells(&self.players[0].moves());
            if untried.is_empty() {
                break;
            }
            let coord = untried[self.rng.random_range(0..untried.len())];
            self.make_move(coord, 1)?;
        }
        Ok(self.status())
    }

    /// The player that lost, once the match is decided.
    pub fn loser(&self) -> Option<PlayerId> {
        self.loser.get()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.loser().map(opponent)
    }

    pub fn status(&self) -> MatchStatus {
        match self.loser() {
            Some(loser) => MatchStatus::Finished {
                winner: opponent(loser),
                loser,
            },
            None => MatchStatus::InProgress,
        }
    }

    pub fn history(&self) -> Vec<MatchEvent> {
        self.history.borrow().clone()
    }

    /// Both boards, player 1 first.
    pub fn render(&self) -> String {
        let [first, second] = &self.players;
        first.with_board(|a| second.with_board(|b| ui::render_pair(a, b)))
    }

    pub fn summary(&self) -> MatchSummary {
        let [first, second] = &self.players;
        MatchSummary {
            status: self.status(),
            winner: self.winner(),
            loser: self.loser(),
            shots: [first.moves().len(), second.moves().len()],
            hits: [first.moves_that_hit().len(), second.moves_that_hit().len()],
            ships_sunk: [second.sunk_count(), first.sunk_count()],
        }
    }
}

fn fresh_players(rng: &mut SmallRng, bus: &EventBus) -> [Player; 2] {
    [
        Player::connected(PlayerId::ONE, SmallRng::from_rng(rng), bus),
        Player::connected(PlayerId::TWO, SmallRng::from_rng(rng), bus),
    ]
}

fn opponent(id: PlayerId) -> PlayerId {
    if id == PlayerId::ONE {
        PlayerId::TWO
    } else {
        PlayerId::ONE
    }
}

fn untried_cells(tried: &[Coord]) -> Vec<Coord> {
    let n = BOARD_SIZE as i32;
    (0..n)
        .flat_map(|y| (0..n).map(move |x| Coord::new(x, y)))
        .filter(|c| !tried.contains(c))
        .collect()
}

