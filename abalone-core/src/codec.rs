//! Moves and the dense action-id encoding

use crate::board::{Coordinate, Direction, NUM_CELLS, NUM_COLS};
use serde::{Deserialize, Serialize};

/// Dense action identifier in `[0, NUM_DISTINCT_ACTIONS)`
pub type ActionId = u32;

/// Single in-line step, or 2/3-marble slides toward either sister direction
pub const NUM_SUBTYPES: usize = 5;

pub const NUM_ACTIONS_PER_CELL: usize = Direction::COUNT * NUM_SUBTYPES;

pub const NUM_DISTINCT_ACTIONS: usize = NUM_CELLS * NUM_ACTIONS_PER_CELL;

/// A move: in-line when `end` is one step from `start` along `direction`,
/// otherwise a slide of the line running from `start` to `end`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub direction: Direction,
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Move {
    pub fn new(direction: Direction, start: Coordinate, end: Coordinate) -> Self {
        Self { direction, start, end }
    }

    /// Single in-line step of the marble at `start`
    pub fn inline(start: Coordinate, direction: Direction) -> Self {
        Self::new(direction, start, start.step(direction))
    }

    pub fn is_inline(&self) -> bool {
        self.end == self.start.step(self.direction)
    }

    pub fn is_slide(&self) -> bool {
        !self.is_inline()
    }
}

/// Subtype offsets: (direction relative to the move direction, multiplier)
fn subtype_offset(direction: Direction, subtype: usize) -> ((i8, i8), i8) {
    match subtype {
        0 => (direction.offset(), 1),
        1 => (direction.forward_sister().offset(), 1),
        2 => (direction.backward_sister().offset(), 1),
        3 => (direction.forward_sister().offset(), 2),
        4 => (direction.backward_sister().offset(), 2),
        _ => unreachable!("subtype {} out of range", subtype),
    }
}

/// Decode an action id into its move.
///
/// Panics if `action` is outside the action space.
pub fn decode(action: ActionId) -> Move {
    assert!(
        (action as usize) < NUM_DISTINCT_ACTIONS,
        "action id {} outside [0, {})",
        action,
        NUM_DISTINCT_ACTIONS
    );

    let mut remains = action as usize;
    let subtype = remains % NUM_SUBTYPES;
    remains /= NUM_SUBTYPES;
    let direction = Direction::from_index(remains % Direction::COUNT);
    remains /= Direction::COUNT;
    let col = (remains % NUM_COLS as usize) as i8;
    let row = (remains / NUM_COLS as usize) as i8;

    let start = Coordinate::new(row, col);
    let (offset, times) = subtype_offset(direction, subtype);
    Move::new(direction, start, start.offset(offset, times))
}

/// Encode a move into its action id.
///
/// Slides whose end does not match any sister offset fall back to subtype 0.
pub fn encode(mv: &Move) -> ActionId {
    debug_assert!(
        mv.start.is_on_grid(),
        "move start ({}, {}) is off the grid",
        mv.start.row,
        mv.start.col
    );

    let subtype = (0..NUM_SUBTYPES)
        .find(|&subtype| {
            let (offset, times) = subtype_offset(mv.direction, subtype);
            mv.start.offset(offset, times) == mv.end
        })
        .unwrap_or(0);

    let cell = mv.start.row as usize * NUM_COLS as usize + mv.start.col as usize;
    let id = (cell * Direction::COUNT + mv.direction.index()) * NUM_SUBTYPES + subtype;
    id as ActionId
}
