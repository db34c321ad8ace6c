//! Move legality and move application
//!
//! In-line moves push a line of up to three own marbles one step along its
//! axis; a longer line may push a strictly shorter opposing line (sumito).
//! Slides shift a line of two or three marbles sideways into empty cells.

use crate::board::{Board, CellState, Coordinate, Direction, Player};
use crate::codec::Move;

/// Cells inspected along the push axis, `start` included
const PUSH_WINDOW: usize = 6;

/// Longest line that may move together
const MAX_LINE: i8 = 3;

/// A cell along the push axis, seen from the mover
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Own,
    Opponent,
    Empty,
    /// Off the grid or an invalid corner
    Edge,
}

fn slot(state: CellState, player: Player) -> Slot {
    match state {
        CellState::Empty => Slot::Empty,
        CellState::Invalid => Slot::Edge,
        s if s == player.marble() => Slot::Own,
        _ => Slot::Opponent,
    }
}

/// Check whether `mv` is legal for `player` on `board`
pub fn is_valid(mv: &Move, board: &Board, player: Player) -> bool {
    if !mv.start.is_on_grid() || !mv.end.is_on_grid() {
        return false;
    }
    if board.get(mv.start) != player.marble() {
        return false;
    }

    if mv.is_inline() {
        is_valid_push(mv, board, player)
    } else {
        is_valid_slide(mv, board, player)
    }
}

fn is_valid_push(mv: &Move, board: &Board, player: Player) -> bool {
    use Slot::*;

    let mut line = [Edge; PUSH_WINDOW];
    let mut at = mv.start;
    for cell in line.iter_mut() {
        *cell = slot(board.get_or_invalid(at), player);
        at = at.step(mv.direction);
    }

    matches!(
        line,
        [_, Empty, ..]
            | [_, Own, Empty, ..]
            | [_, Own, Opponent, Empty | Edge, ..]
            | [_, Own, Own, Empty, ..]
            | [_, Own, Own, Opponent, Empty | Edge, _]
            | [_, Own, Own, Opponent, Opponent, Empty | Edge]
    )
}

/// Unit step along the line from `start` to `end`, with the line length.
///
/// The span test is a bounding-box approximation; the stepped walk in the
/// callers decides which cells actually move.
fn slide_line(mv: &Move) -> Option<(Direction, i8)> {
    let dr = mv.end.row - mv.start.row;
    let dc = mv.end.col - mv.start.col;
    let row_span = dr.abs() + 1;
    let col_span = dc.abs() + 1;
    if row_span > MAX_LINE || col_span > MAX_LINE {
        return None;
    }
    let line = Direction::from_offset((dr.signum(), dc.signum()))?;
    Some((line, row_span.max(col_span)))
}

fn is_valid_slide(mv: &Move, board: &Board, player: Player) -> bool {
    let Some((line, length)) = slide_line(mv) else {
        return false;
    };

    let mut at = mv.start;
    for _ in 0..length {
        if board.get_or_invalid(at) != player.marble() {
            return false;
        }
        let target = at.step(mv.direction);
        if board.get_or_invalid(target) != CellState::Empty {
            return false;
        }
        at = at.step(line);
    }
    true
}

/// Apply `mv` to `board`. The move must already have passed [`is_valid`].
pub fn apply(mv: &Move, board: &mut Board) {
    if mv.is_inline() {
        apply_push(mv.start, mv.direction, board);
    } else {
        apply_slide(mv, board);
    }
}

/// Shift the contiguous run starting at `start` one step along `direction`.
/// A marble carried onto an invalid cell leaves the board.
fn apply_push(start: Coordinate, direction: Direction, board: &mut Board) {
    let mut carried = CellState::Empty;
    let mut at = start;
    loop {
        let current = board.get_or_invalid(at);
        if current == CellState::Invalid {
            break;
        }
        board.set(at, carried);
        if current == CellState::Empty {
            break;
        }
        carried = current;
        at = at.step(direction);
    }
}

fn apply_slide(mv: &Move, board: &mut Board) {
    let Some((line, length)) = slide_line(mv) else {
        return;
    };
    let player = board.get(mv.start);

    let mut at = mv.start;
    for _ in 0..length {
        if board.get_or_invalid(at) != player {
            break;
        }
        let target = at.step(mv.direction);
        if board.get_or_invalid(target) != CellState::Empty {
            break;
        }
        board.set(target, player);
        board.set(at, CellState::Empty);
        at = at.step(line);
    }
}
