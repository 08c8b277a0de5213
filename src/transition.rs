use crate::data::{Dir, Pos};

/// How a state was reached from its predecessor.
///
/// Recorded when the move is made so presentation never has to diff two states
/// (a bump and "nothing happened" would look the same).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The root state, nothing happened yet.
    Initial,
    /// The player moved one cell. If `pushed` is set, that box moved
    /// from `to` one more cell in the same direction.
    LinearMove {
        from: Pos,
        to: Pos,
        pushed: Option<usize>,
    },
    /// The player tried to move towards `dir` but a wall or an unpushable box was in the way.
    WallBump { from: Pos, dir: Dir },
}

impl Transition {
    pub fn dir(&self) -> Option<Dir> {
        match *self {
            Transition::Initial => None,
            Transition::LinearMove { from, to, .. } => Some(Dir::new(to.x - from.x, to.y - from.y)),
            Transition::WallBump { dir, .. } => Some(dir),
        }
    }

    pub fn is_push(&self) -> bool {
        match *self {
            Transition::LinearMove {
                pushed: Some(_), ..
            } => true,
            _ => false,
        }
    }

    pub fn is_bump(&self) -> bool {
        match *self {
            Transition::WallBump { .. } => true,
            _ => false,
        }
    }
}
