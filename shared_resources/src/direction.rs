use std::fmt;

use crate::floor::Floor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` to `to`. Equal floors count as down.
    pub fn towards(from: Floor, to: Floor) -> Self {
        if to > from {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// Reads a console word; anything other than "up" is taken as down.
    pub fn from_word(word: &str) -> Self {
        if word.eq_ignore_ascii_case("up") {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn iter() -> impl Iterator<Item = Direction> {
        [Direction::Up, Direction::Down].iter().copied()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
