//! Text notation for moves
//!
//! A cell is written as a row letter (`a` is the bottom row) followed by a
//! column digit. In-line moves are `<start><end>`; slides are
//! `<start><line end><start shifted one step>`, the third cell naming the
//! direction of travel.

use std::fmt;
use std::str::FromStr;

use crate::board::{Coordinate, Direction, NUM_COLS, NUM_ROWS};
use crate::codec::Move;
use crate::error::NotationError;

fn cell_to_string(at: Coordinate) -> String {
    let letter = (b'a' as i16 + (NUM_ROWS - 1 - at.row) as i16) as u8 as char;
    let digit = (b'1' as i16 + at.col as i16) as u8 as char;
    format!("{}{}", letter, digit)
}

fn parse_cell(text: &[char]) -> Result<Coordinate, NotationError> {
    let raw: String = text.iter().collect();
    let bad = || NotationError::BadCell(raw.clone());

    let (letter, digit) = match text {
        [letter, digit] if letter.is_ascii_lowercase() && digit.is_ascii_digit() => {
            (*letter as u8 as i16, *digit as u8 as i16)
        }
        _ => return Err(bad()),
    };
    let row = (NUM_ROWS - 1) as i16 - (letter - b'a' as i16);
    let col = digit - b'1' as i16;
    let at = Coordinate::new(row.clamp(-1, NUM_ROWS as i16) as i8, col.clamp(-1, NUM_COLS as i16) as i8);
    if at.is_on_grid() {
        Ok(at)
    } else {
        Err(bad())
    }
}

fn delta(from: Coordinate, to: Coordinate) -> (i8, i8) {
    (to.row - from.row, to.col - from.col)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", cell_to_string(self.start), cell_to_string(self.end))?;
        if self.is_slide() {
            write!(f, "{}", cell_to_string(self.start.step(self.direction)))?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().to_ascii_lowercase().chars().collect();
        if chars.len() != 4 && chars.len() != 6 {
            return Err(NotationError::BadLength(s.to_string()));
        }

        let start = parse_cell(&chars[0..2])?;
        let second = parse_cell(&chars[2..4])?;
        let not_adjacent = |to: Coordinate| NotationError::NotAdjacent {
            from: cell_to_string(start),
            to: cell_to_string(to),
        };

        if chars.len() == 4 {
            let direction = Direction::from_offset(delta(start, second))
                .ok_or_else(|| not_adjacent(second))?;
            return Ok(Move::new(direction, start, second));
        }

        let (dr, dc) = delta(start, second);
        if dr.abs().max(dc.abs()) > 2 {
            return Err(NotationError::LineTooLong(s.to_string()));
        }
        let line_step = (dr.clamp(-1, 1), dc.clamp(-1, 1));

        let shifted = parse_cell(&chars[4..6])?;
        let direction = Direction::from_offset(delta(start, shifted))
            .ok_or_else(|| not_adjacent(shifted))?;

        // Canonical start is the end lying along a sister of the direction
        let sisters = [
            direction.forward_sister().offset(),
            direction.backward_sister().offset(),
        ];
        if sisters.contains(&line_step) {
            Ok(Move::new(direction, start, second))
        } else {
            Ok(Move::new(direction, second, start))
        }
    }
}
