use std::error::Error;
use std::fmt::{self, Display, Formatter};

use fnv::FnvHashSet;

use crate::config::Format;
use crate::data::Pos;
use crate::map_formatter::MapFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErr {
    PlayerInWall,
    PlayerInBox,
    BoxesGoals,
    DuplicateGoal(Pos),
    DuplicateBox(Pos),
}

impl Display for ValidationErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ValidationErr::PlayerInWall => write!(f, "Player is inside a wall"),
            ValidationErr::PlayerInBox => write!(f, "Player is inside a box"),
            ValidationErr::BoxesGoals => write!(f, "Different number of boxes and goals"),
            ValidationErr::DuplicateGoal(pos) => write!(f, "More than one goal at {}", pos),
            ValidationErr::DuplicateBox(pos) => write!(f, "More than one box at {}", pos),
        }
    }
}

impl Error for ValidationErr {}

/// The part of a level that never changes during a playthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    walls: FnvHashSet<Pos>,
    goals: Vec<Pos>,
}

impl Map {
    pub fn walls(&self) -> &FnvHashSet<Pos> {
        &self.walls
    }

    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.walls.contains(&pos)
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.goals.contains(&pos)
    }
}

/// A validated starting position: the map plus where the player and boxes begin.
///
/// Turn it into a playable state with `History::start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    map: Map,
    player: Pos,
    boxes: Vec<Pos>,
}

impl Level {
    pub fn new(
        player: Pos,
        goals: Vec<Pos>,
        boxes: Vec<Pos>,
        walls: Vec<Pos>,
    ) -> Result<Level, ValidationErr> {
        let walls: FnvHashSet<Pos> = walls.into_iter().collect();

        if walls.contains(&player) {
            return Err(ValidationErr::PlayerInWall);
        }
        if boxes.contains(&player) {
            return Err(ValidationErr::PlayerInBox);
        }
        if goals.len() != boxes.len() {
            return Err(ValidationErr::BoxesGoals);
        }
        if let Some(pos) = first_duplicate(&goals) {
            return Err(ValidationErr::DuplicateGoal(pos));
        }
        if let Some(pos) = first_duplicate(&boxes) {
            return Err(ValidationErr::DuplicateBox(pos));
        }

        Ok(Level {
            map: Map { walls, goals },
            player,
            boxes,
        })
    }

    /// Just the player, no walls, goals or boxes. Always valid.
    pub fn with_player(player: Pos) -> Level {
        Level {
            map: Map {
                walls: FnvHashSet::default(),
                goals: Vec::new(),
            },
            player,
            boxes: Vec::new(),
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    pub fn format(&self, format: Format) -> MapFormatter<'_> {
        MapFormatter::new(&self.map, self.player, &self.boxes, format)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(Format::Ascii))
    }
}

/// Width and height of the smallest rectangle starting at (0, 0)
/// that contains everything in the level.
pub(crate) fn level_size(map: &Map, player: Pos, boxes: &[Pos]) -> (i32, i32) {
    let (mut max_x, mut max_y) = (player.x, player.y);
    for pos in map.walls.iter().chain(&map.goals).chain(boxes) {
        max_x = max_x.max(pos.x);
        max_y = max_y.max(pos.y);
    }
    (max_x.saturating_add(1), max_y.saturating_add(1))
}

fn first_duplicate(positions: &[Pos]) -> Option<Pos> {
    let mut seen = FnvHashSet::default();
    positions.iter().cloned().find(|&pos| !seen.insert(pos))
}
