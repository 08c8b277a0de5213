use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::data::{Dir, DOWN, LEFT, RIGHT, UP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovesErr {
    InvalidChar(char),
}

impl Display for MovesErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MovesErr::InvalidChar(c) => write!(f, "Invalid move: '{}' (expected one of lurdLURD)", c),
        }
    }
}

impl Error for MovesErr {}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    dir: Dir,
    is_push: bool,
}

impl Move {
    pub fn new(dir: Dir, is_push: bool) -> Self {
        Move { dir, is_push }
    }

    pub fn dir(self) -> Dir {
        self.dir
    }

    pub fn is_push(self) -> bool {
        self.is_push
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_push {
            write!(f, "{}", self.dir.to_string().to_uppercase())?;
        } else {
            write!(f, "{}", self.dir)?;
        }
        Ok(())
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Moves in the usual LURD notation - lowercase for steps, uppercase for pushes.
///
/// When parsed from a string, the case is kept but only the directions matter
/// for replaying - whether a move pushes is decided by the level.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.0.iter().filter(|m| m.is_push).count()
    }

    pub fn add(&mut self, mov: Move) {
        self.0.push(mov);
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Move> {
        self.0.iter()
    }
}

impl IntoIterator for Moves {
    type Item = Move;
    type IntoIter = ::std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = ::std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Moves {
    type Err = MovesErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut moves = Moves::default();
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let dir = match c.to_ascii_lowercase() {
                'u' => UP,
                'r' => RIGHT,
                'd' => DOWN,
                'l' => LEFT,
                _ => return Err(MovesErr::InvalidChar(c)),
            };
            moves.add(Move::new(dir, c.is_ascii_uppercase()));
        }
        Ok(moves)
    }
}
