//! Board geometry: a hex board embedded in a 9x9 square grid

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Grid rows
pub const NUM_ROWS: i8 = 9;
/// Grid columns
pub const NUM_COLS: i8 = 9;
/// Total grid cells, including the invalid corners
pub const NUM_CELLS: usize = (NUM_ROWS as usize) * (NUM_COLS as usize);

/// Marbles each player starts with in every standard layout
pub const STARTING_MARBLES: usize = 14;

/// Occupancy of a grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Grid position with no hex counterpart
    Invalid,
    Empty,
    Player1,
    Player2,
}

impl CellState {
    /// Number of distinct cell states (observation channels)
    pub const COUNT: usize = 4;

    /// Observation channel for this state
    pub fn channel(self) -> usize {
        match self {
            CellState::Invalid => 0,
            CellState::Empty => 1,
            CellState::Player1 => 2,
            CellState::Player2 => 3,
        }
    }

    /// Owner of the marble in this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            CellState::Player1 => Some(Player::One),
            CellState::Player2 => Some(Player::Two),
            CellState::Invalid | CellState::Empty => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            CellState::Invalid => ' ',
            CellState::Empty => '.',
            CellState::Player1 => '1',
            CellState::Player2 => '2',
        }
    }
}

/// Player seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Seat index (0 or 1)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Cell state holding this player's marbles
    pub fn marble(self) -> CellState {
        match self {
            Player::One => CellState::Player1,
            Player::Two => CellState::Player2,
        }
    }
}

/// Grid coordinate (row 0 is the top of the board, letter `i`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i8,
    pub col: i8,
}

impl Coordinate {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this coordinate lies inside the 9x9 grid
    pub fn is_on_grid(&self) -> bool {
        (0..NUM_ROWS).contains(&self.row) && (0..NUM_COLS).contains(&self.col)
    }

    /// Translate by `(dr, dc)` scaled by `times`
    pub fn offset(&self, (dr, dc): (i8, i8), times: i8) -> Coordinate {
        Coordinate::new(self.row + dr * times, self.col + dc * times)
    }

    /// Neighbor one step away in `direction`
    pub fn step(&self, direction: Direction) -> Coordinate {
        self.offset(direction.offset(), 1)
    }

    /// Row-major index into the grid
    fn index(&self) -> usize {
        assert!(self.is_on_grid(), "coordinate {:?} is off the grid", self);
        self.row as usize * NUM_COLS as usize + self.col as usize
    }
}

/// Row/column offsets, indexed by `Direction as usize`
const OFFSETS: [(i8, i8); 6] = [
    (0, 1),   // Right
    (-1, 1),  // UpRight
    (-1, 0),  // UpLeft
    (0, -1),  // Left
    (1, -1),  // DownLeft
    (1, 0),   // DownRight
];

/// The six hex directions, in counterclockwise order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right = 0,
    UpRight = 1,
    UpLeft = 2,
    Left = 3,
    DownLeft = 4,
    DownRight = 5,
}

impl Direction {
    pub const COUNT: usize = 6;

    pub const ALL: [Direction; 6] = [
        Direction::Right,
        Direction::UpRight,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Direction at position `index` of the cycle (taken mod 6)
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit (row, column) offset
    pub fn offset(self) -> (i8, i8) {
        OFFSETS[self.index()]
    }

    /// Forward sister: next direction counterclockwise
    pub fn forward_sister(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Backward sister: two steps counterclockwise
    pub fn backward_sister(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Direction whose offset is exactly `(dr, dc)`
    pub fn from_offset(offset: (i8, i8)) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == offset)
    }
}

/// Named initial layouts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    Classic,
    BelgianDaisy,
    /// All hex cells empty; only useful as a validity mask
    Empty,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Classic, Layout::BelgianDaisy, Layout::Empty];

    pub fn name(self) -> &'static str {
        match self {
            Layout::Classic => "classic",
            Layout::BelgianDaisy => "belgian-daisy",
            Layout::Empty => "empty",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layout| layout.name() == name)
    }

    fn rows(self) -> &'static [[CellState; 9]; 9] {
        match self {
            Layout::Classic => &CLASSIC,
            Layout::BelgianDaisy => &BELGIAN_DAISY,
            Layout::Empty => &VALID_MASK,
        }
    }
}

impl FromStr for Layout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConfigError::UnknownLayout(s.to_string()))
    }
}

const X: CellState = CellState::Invalid;
const O: CellState = CellState::Empty;
const A: CellState = CellState::Player1;
const B: CellState = CellState::Player2;

//   columns 1..9, rows i (top) .. a (bottom)
const VALID_MASK: [[CellState; 9]; 9] = [
    [X, X, X, X, O, O, O, O, O], // i
    [X, X, X, O, O, O, O, O, O], // h
    [X, X, O, O, O, O, O, O, O], // g
    [X, O, O, O, O, O, O, O, O], // f
    [O, O, O, O, O, O, O, O, O], // e
    [O, O, O, O, O, O, O, O, X], // d
    [O, O, O, O, O, O, O, X, X], // c
    [O, O, O, O, O, O, X, X, X], // b
    [O, O, O, O, O, X, X, X, X], // a
];

const CLASSIC: [[CellState; 9]; 9] = [
    [X, X, X, X, B, B, B, B, B], // i
    [X, X, X, B, B, B, B, B, B], // h
    [X, X, O, O, B, B, B, O, O], // g
    [X, O, O, O, O, O, O, O, O], // f
    [O, O, O, O, O, O, O, O, O], // e
    [O, O, O, O, O, O, O, O, X], // d
    [O, O, A, A, A, O, O, X, X], // c
    [A, A, A, A, A, A, X, X, X], // b
    [A, A, A, A, A, X, X, X, X], // a
];

const BELGIAN_DAISY: [[CellState; 9]; 9] = [
    [X, X, X, X, B, B, O, A, A], // i
    [X, X, X, B, B, B, A, A, A], // h
    [X, X, O, B, B, O, A, A, O], // g
    [X, O, O, O, O, O, O, O, O], // f
    [O, O, O, O, O, O, O, O, O], // e
    [O, O, O, O, O, O, O, O, X], // d
    [O, A, A, O, B, B, O, X, X], // c
    [A, A, A, B, B, B, X, X, X], // b
    [A, A, O, B, B, X, X, X, X], // a
];

/// Cell occupancy for the whole grid
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [CellState; NUM_CELLS],
}

impl Board {
    pub fn from_layout(layout: Layout) -> Self {
        let mut cells = [CellState::Invalid; NUM_CELLS];
        for (r, row) in layout.rows().iter().enumerate() {
            for (c, &state) in row.iter().enumerate() {
                cells[r * NUM_COLS as usize + c] = state;
            }
        }
        Self { cells }
    }

    /// Cell at `at`; panics when `at` is off the grid
    pub fn get(&self, at: Coordinate) -> CellState {
        self.cells[at.index()]
    }

    /// Overwrite the cell at `at`; panics when `at` is off the grid
    pub fn set(&mut self, at: Coordinate, state: CellState) {
        self.cells[at.index()] = state;
    }

    /// Cell at `at`, treating off-grid positions as Invalid
    pub fn get_or_invalid(&self, at: Coordinate) -> CellState {
        if at.is_on_grid() {
            self.get(at)
        } else {
            CellState::Invalid
        }
    }

    /// Iterate all grid cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        self.cells.iter().enumerate().map(|(i, &state)| {
            let at = Coordinate::new((i / NUM_COLS as usize) as i8, (i % NUM_COLS as usize) as i8);
            (at, state)
        })
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Marbles of `player` still on the board
    pub fn marbles(&self, player: Player) -> usize {
        self.count(player.marble())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_layout(Layout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_validity() {
        let board = Board::from_layout(Layout::Empty);
        assert_eq!(board.count(CellState::Invalid), 20);
        assert_eq!(board.count(CellState::Empty), 61);
        assert!(Coordinate::new(0, 0).is_on_grid());
        assert!(Coordinate::new(8, 8).is_on_grid());
        assert!(!Coordinate::new(-1, 4).is_on_grid());
        assert!(!Coordinate::new(4, 9).is_on_grid());
    }

    #[test]
    fn test_layouts_share_mask() {
        let mask = Board::from_layout(Layout::Empty);
        for layout in Layout::ALL {
            let board = Board::from_layout(layout);
            for (at, state) in mask.cells() {
                assert_eq!(
                    state == CellState::Invalid,
                    board.get(at) == CellState::Invalid,
                    "{:?} disagrees with mask at {:?}",
                    layout,
                    at
                );
            }
        }
    }

    #[test]
    fn test_starting_marbles() {
        for layout in [Layout::Classic, Layout::BelgianDaisy] {
            let board = Board::from_layout(layout);
            assert_eq!(board.marbles(Player::One), STARTING_MARBLES);
            assert_eq!(board.marbles(Player::Two), STARTING_MARBLES);
        }
    }

    #[test]
    fn test_sisters() {
        assert_eq!(Direction::Right.forward_sister(), Direction::UpRight);
        assert_eq!(Direction::Right.backward_sister(), Direction::UpLeft);
        assert_eq!(Direction::DownLeft.forward_sister(), Direction::DownRight);
        assert_eq!(Direction::DownLeft.backward_sister(), Direction::Right);
        assert_eq!(Direction::DownRight.backward_sister(), Direction::UpRight);
    }

    #[test]
    fn test_opposite_offsets() {
        for d in Direction::ALL {
            let (dr, dc) = d.offset();
            let opposite = Direction::from_index(d.index() + 3);
            assert_eq!(opposite.offset(), (-dr, -dc));
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::default();
        let at = Coordinate::new(4, 4);
        assert_eq!(board.get(at), CellState::Empty);
        board.set(at, CellState::Player2);
        assert_eq!(board.get(at), CellState::Player2);
    }

    #[test]
    #[should_panic]
    fn test_off_grid_access_panics() {
        Board::default().get(Coordinate::new(9, 0));
    }

    #[test]
    fn test_layout_names() {
        for layout in Layout::ALL {
            assert_eq!(Layout::from_name(layout.name()), Some(layout));
        }
        assert_eq!(Layout::from_name("hexagon"), None);
        assert_eq!("belgian-daisy".parse::<Layout>(), Ok(Layout::BelgianDaisy));
        assert!("daisy".parse::<Layout>().is_err());
    }
}
