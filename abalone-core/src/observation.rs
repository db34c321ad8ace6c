//! Observations: one-hot tensor and text rendering

use std::fmt;

use crate::board::{Board, CellState, Coordinate, NUM_CELLS, NUM_COLS, NUM_ROWS};
use crate::game::GameState;

/// Tensor shape: (cell state, row, column)
pub const OBSERVATION_SHAPE: [usize; 3] = [CellState::COUNT, NUM_ROWS as usize, NUM_COLS as usize];

pub const OBSERVATION_SIZE: usize = CellState::COUNT * NUM_CELLS;

/// Write the one-hot encoding of `board` into `values` (row-major over
/// `OBSERVATION_SHAPE`)
pub fn encode_board(board: &Board, values: &mut [f32]) {
    assert_eq!(values.len(), OBSERVATION_SIZE, "observation buffer has wrong size");
    values.fill(0.0);
    for (at, state) in board.cells() {
        let cell = at.row as usize * NUM_COLS as usize + at.col as usize;
        values[state.channel() * NUM_CELLS + cell] = 1.0;
    }
}

/// Hex-shaped picture of the board: row letters on the left, column digits
/// along the bottom edges
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..NUM_ROWS {
        let letter = (b'a' + (NUM_ROWS - 1 - row) as u8) as char;
        let indent = (row - 4).unsigned_abs() as usize;
        out.push_str(&format!("{}{}", letter, " ".repeat(indent + 1)));

        let cells: Vec<String> = (0..NUM_COLS)
            .map(|col| board.get(Coordinate::new(row, col)))
            .filter(|&state| state != CellState::Invalid)
            .map(|state| state.symbol().to_string())
            .collect();
        out.push_str(&cells.join(" "));

        // lower half: last column label on the right edge
        if row > 4 {
            out.push_str(&format!("  {}", NUM_COLS - (row - 4) + 1));
        }
        out.push('\n');
    }
    out.push_str("      1 2 3 4 5\n");
    out
}

impl GameState {
    pub fn observation_tensor(&self) -> Vec<f32> {
        let mut values = vec![0.0; OBSERVATION_SIZE];
        encode_board(self.board(), &mut values);
        values
    }

    pub fn observation_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [one, two] = self.returns();
        let winner = match self.outcome() {
            Some(p) => p.marble().symbol(),
            None => '-',
        };
        write!(f, "{}", render_board(self.board()))?;
        writeln!(f, "moves: {}", self.move_number())?;
        writeln!(f, "returns: {}, {}", one, two)?;
        writeln!(f, "winner: {}", winner)?;
        write!(f, "done: {}", self.is_terminal())
    }
}
