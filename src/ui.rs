//! Text rendering of boards.
//!
//! The grid layout is parsed by external tooling, so it must not drift:
//!
//! ```text
//!      A  B  C  D  E  F  G  H  I  J
//!  1:  S  -  -  M  - ...
//! 10:  - ...
//! ```

use alloc::string::String;
use core::fmt::Write;

use crate::board::Board;
use crate::common::Coord;
use crate::config::BOARD_SIZE;

const HEADER: &str = "     A  B  C  D  E  F  G  H  I  J\n";

/// Render `board` as a newline-terminated grid.
///
/// Cells are three characters wide: ` - ` empty, ` S ` ship, ` X ` hit ship,
/// ` M ` miss. Rows are `y`, columns are `x`.
pub fn render_grid(board: &Board) -> String {
    render_with(|coord| cell(board, coord))
}

/// Render one player's shots at the opponent: ` X ` hit, ` M ` miss.
pub fn render_targets(hits: &[Coord], misses: &[Coord]) -> String {
    render_with(|coord| {
        if hits.contains(&coord) {
            " X "
        } else if misses.contains(&coord) {
            " M "
        } else {
            " - "
        }
    })
}

fn render_with(cell: impl Fn(Coord) -> &'static str) -> String {
    let mut out = String::from(HEADER);
    for y in 0..BOARD_SIZE as i32 {
        let _ = write!(out, "{:>2}: ", y + 1);
        for x in 0..BOARD_SIZE as i32 {
            out.push_str(cell(Coord::new(x, y)));
        }
        out.push('\n');
    }
    out
}

fn cell(board: &Board, coord: Coord) -> &'static str {
    if board.ship_coords().contains(&coord) {
        if board.hits().contains(&coord) {
            " X "
        } else {
            " S "
        }
    } else if board.misses().contains(&coord) {
        " M "
    } else {
        " - "
    }
}

/// Both boards of a match, player 1 first.
pub fn render_pair(first: &Board, second: &Board) -> String {
    let mut out = render_grid(first);
    out.push_str(" \n ");
    out.push_str(&render_grid(second));
    out
}
