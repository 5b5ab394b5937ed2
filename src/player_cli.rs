#![cfg(feature = "std")]

use std::io::{BufRead, Write};

use crate::{
    common::{Coord, MoveResult, PlayerId},
    game::{MatchCoordinator, MatchStatus, Turn},
    ui,
};

/// Print the human's fleet and their shots at the opponent.
pub fn print_player_view<W: Write>(coordinator: &MatchCoordinator, out: &mut W) -> std::io::Result<()> {
    let [me, _] = coordinator.players();
    writeln!(out, "\nYour fleet:")?;
    write!(out, "{}", me.render_grid())?;
    writeln!(out, "\nYour shots:")?;
    write!(
        out,
        "{}",
        ui::render_targets(&me.moves_that_hit(), &me.moves_that_missed())
    )?;
    Ok(())
}

fn print_targeting_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Enter a target as column letter and row number, e.g. B7 or j10.")?;
    writeln!(out, "Type 'help' to see this again or 'quit' to leave the match.")
}

fn report_turn<W: Write>(coordinator: &MatchCoordinator, turn: &Turn, out: &mut W) -> std::io::Result<()> {
    let [me, _] = coordinator.players();
    for (id, result) in &turn.moves {
        match (*id, *result) {
            (PlayerId::ONE, MoveResult::Accepted(c)) => {
                let outcome = if me.moves_that_hit().contains(&c) { "HIT" } else { "miss" };
                writeln!(out, "You fire at {}: {}", c, outcome)?;
            }
            (PlayerId::ONE, MoveResult::Duplicate(c)) => {
                writeln!(out, "You already fired at {}.", c)?;
            }
            (_, MoveResult::Accepted(c)) => {
                let outcome = if me.hits().contains(&c) { "HIT" } else { "miss" };
                writeln!(out, "Opponent fires at {}: {}", c, outcome)?;
            }
            (_, MoveResult::Duplicate(c)) => {
                writeln!(out, "Opponent fires at {} again and wastes the shot.", c)?;
            }
            (_, MoveResult::OutOfBounds(c)) => {
                writeln!(out, "{} is off the board.", c)?;
            }
        }
    }
    Ok(())
}

/// Drive a match from line-oriented input, the human playing player 1 and
/// the automated opponent answering every move.
///
/// Returns when the match is decided, on `quit`, or at end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    coordinator: &MatchCoordinator,
    input: R,
    out: &mut W,
) -> anyhow::Result<MatchStatus> {
    print_targeting_help(out)?;
    print_player_view(coordinator, out)?;
    let mut lines = input.lines();
    loop {
        write!(out, "\nYour move: ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => continue,
            "help" | "h" | "?" => {
                print_targeting_help(out)?;
                continue;
            }
            "quit" | "q" | "exit" => break,
            _ => {}
        }
        let coord: Coord = match line.parse() {
            Ok(c) => c,
            Err(e) => {
                writeln!(out, "{}: {:?}", e, line)?;
                continue;
            }
        };
        let turn = coordinator.make_move(coord, 1)?;
        report_turn(coordinator, &turn, out)?;
        print_player_view(coordinator, out)?;
        if let MatchStatus::Finished { winner, .. } = turn.status {
            writeln!(out, "\nGAME OVER")?;
            if winner == PlayerId::ONE {
                writeln!(out, "You have sunk all enemy ships!")?;
            } else {
                writeln!(out, "All your ships have been destroyed.")?;
            }
            break;
        }
    }
    Ok(coordinator.status())
}
