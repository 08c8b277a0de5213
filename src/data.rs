use std::fmt::{self, Display, Formatter};
use std::ops::Add;

pub const UP: Dir = Dir { dx: 0, dy: -1 };
pub const RIGHT: Dir = Dir { dx: 1, dy: 0 };
pub const DOWN: Dir = Dir { dx: 0, dy: 1 };
pub const LEFT: Dir = Dir { dx: -1, dy: 0 };
pub const DIRECTIONS: [Dir; 4] = [UP, RIGHT, DOWN, LEFT];

/// A cell of the level. `y` grows downwards, same as the rows of a level file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Pos {
        Pos { x, y }
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Pos {
        Pos { x, y }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Displacement by one cell. Nothing stops you from making a diagonal one
/// but the game only ever uses the 4 constants above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dir {
    pub dx: i32,
    pub dy: i32,
}

impl Dir {
    pub fn new(dx: i32, dy: i32) -> Dir {
        Dir { dx, dy }
    }

    pub fn reverse(self) -> Dir {
        Dir {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            UP => write!(f, "u"),
            RIGHT => write!(f, "r"),
            DOWN => write!(f, "d"),
            LEFT => write!(f, "l"),
            Dir { dx, dy } => write!(f, "({}, {})", dx, dy),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        Pos {
            x: self.x.wrapping_add(dir.dx),
            y: self.y.wrapping_add(dir.dy),
        }
    }
}
