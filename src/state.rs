use std::fmt::{self, Debug, Display, Formatter};
use std::iter;
use std::ptr;

use fnv::FnvHashSet;
use log::{debug, trace};
use typed_arena::Arena;

use crate::config::Format;
use crate::data::{Dir, Pos};
use crate::level::{self, Level, Map};
use crate::map_formatter::MapFormatter;
use crate::moves::{Move, Moves};
use crate::transition::Transition;

/// Owns every state of one or more playthroughs.
///
/// States are never freed individually, the whole history goes away at once
/// when this is dropped (e.g. when starting a different level).
pub struct History<'a> {
    states: Arena<State<'a>>,
}

impl<'a> History<'a> {
    pub fn new() -> Self {
        History {
            states: Arena::new(),
        }
    }

    /// Creates the root state of a new chain.
    pub fn start(&'a self, level: &'a Level) -> &'a State<'a> {
        debug!(
            "Starting level with {} boxes and {} walls",
            level.boxes().len(),
            level.map().walls().len()
        );
        self.states.alloc(State {
            owner: self,
            map: level.map(),
            player: level.player(),
            boxes: level.boxes().to_vec(),
            prev: None,
            transition: Transition::Initial,
        })
    }
}

impl Default for History<'_> {
    fn default() -> Self {
        History::new()
    }
}

impl Debug for History<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "History")
    }
}

/// One immutable snapshot of the game.
///
/// Box indices are stable - `boxes()[i]` is the same box in every state of a chain.
pub struct State<'a> {
    owner: &'a History<'a>,
    map: &'a Map,
    player: Pos,
    boxes: Vec<Pos>,
    prev: Option<&'a State<'a>>,
    transition: Transition,
}

impl<'a> State<'a> {
    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    pub fn goals(&self) -> &'a [Pos] {
        self.map.goals()
    }

    pub fn walls(&self) -> &'a FnvHashSet<Pos> {
        self.map.walls()
    }

    pub fn map(&self) -> &'a Map {
        self.map
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn prev(&self) -> Option<&'a State<'a>> {
        self.prev
    }

    pub fn is_root(&self) -> bool {
        self.prev.is_none()
    }

    /// Number of states before this one.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut state = self.prev;
        while let Some(prev) = state {
            depth += 1;
            state = prev.prev;
        }
        depth
    }

    /// Walks from this state back to the root.
    pub fn history(&self) -> Ancestors<'_, 'a> {
        Ancestors { next: Some(self) }
    }

    pub fn box_at(&self, pos: Pos) -> Option<usize> {
        self.boxes.iter().position(|&b| b == pos)
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.map.is_wall(pos)
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.map.is_goal(pos)
    }

    pub fn boxes_on_goals(&self) -> usize {
        self.boxes.iter().filter(|&&b| self.map.is_goal(b)).count()
    }

    pub fn is_solved(&self) -> bool {
        self.map.goals().iter().all(|g| self.boxes.contains(g))
    }

    /// Width and height of the smallest rectangle starting at (0, 0)
    /// that contains everything in the level.
    pub fn level_size(&self) -> (i32, i32) {
        level::level_size(self.map, self.player, &self.boxes)
    }

    /// Always creates a new state, even if nothing moved.
    pub fn move_towards(&'a self, dir: Dir) -> &'a State<'a> {
        let ahead = self.player + dir;

        // boxes first, though they should never be inside walls
        let next = if let Some(index) = self.box_at(ahead) {
            let beyond = ahead + dir;
            if self.map.is_wall(beyond) || self.box_at(beyond).is_some() {
                trace!("Box {} at {} can't be pushed {}", index, ahead, dir);
                self.bump(dir)
            } else {
                trace!("Pushing box {} from {} to {}", index, ahead, beyond);
                let mut boxes = self.boxes.clone();
                boxes[index] = beyond;
                self.successor(ahead, boxes, Some(index))
            }
        } else if self.map.is_wall(ahead) {
            trace!("Bumped into wall at {}", ahead);
            self.bump(dir)
        } else {
            trace!("Moving from {} to {}", self.player, ahead);
            self.successor(ahead, self.boxes.clone(), None)
        };

        self.owner.states.alloc(next)
    }

    fn successor(&'a self, player: Pos, boxes: Vec<Pos>, pushed: Option<usize>) -> State<'a> {
        State {
            owner: self.owner,
            map: self.map,
            player,
            boxes,
            prev: Some(self),
            transition: Transition::LinearMove {
                from: self.player,
                to: player,
                pushed,
            },
        }
    }

    fn bump(&'a self, dir: Dir) -> State<'a> {
        State {
            owner: self.owner,
            map: self.map,
            player: self.player,
            boxes: self.boxes.clone(),
            prev: Some(self),
            transition: Transition::WallBump {
                from: self.player,
                dir,
            },
        }
    }

    /// The previous state or this one if there's none.
    pub fn undo(&'a self) -> &'a State<'a> {
        self.prev.unwrap_or(self)
    }

    pub fn restart(&'a self) -> &'a State<'a> {
        let mut state = self;
        let mut walked = 0;
        while let Some(prev) = state.prev {
            state = prev;
            walked += 1;
        }
        trace!("Restarted {} states back", walked);
        state
    }

    /// Applies the directions of `moves` one by one. Cases are ignored.
    pub fn replay(&'a self, moves: &Moves) -> &'a State<'a> {
        moves
            .iter()
            .fold(self, |state, mov| state.move_towards(mov.dir()))
    }

    /// Moves that led from the root here, bumps are left out.
    pub fn moves(&self) -> Moves {
        let mut moves: Vec<_> = self
            .history()
            .filter_map(|state| match state.transition {
                Transition::LinearMove { pushed, .. } => {
                    let dir = state.transition.dir()?;
                    Some(Move::new(dir, pushed.is_some()))
                }
                _ => None,
            })
            .collect();
        moves.reverse();
        Moves::new(moves)
    }

    pub fn format(&self, format: Format) -> MapFormatter<'_> {
        MapFormatter::new(self.map, self.player, &self.boxes, format)
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.format(Format::Xsb)
    }
}

/// Equal if the same things are in the same places, regardless of how they got there.
impl PartialEq for State<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.player == other.player
            && self.boxes == other.boxes
            && (ptr::eq(self.map, other.map) || self.map == other.map)
    }
}

impl Eq for State<'_> {}

impl Display for State<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(Format::Ascii))
    }
}

impl Debug for State<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.transition)?;
        write!(f, "{}", self)
    }
}

/// Iterator returned by `State::history`.
#[derive(Debug, Clone)]
pub struct Ancestors<'s, 'a> {
    next: Option<&'s State<'a>>,
}

impl<'s, 'a> Iterator for Ancestors<'s, 'a> {
    type Item = &'s State<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        self.next = cur.prev;
        Some(cur)
    }
}

impl iter::FusedIterator for Ancestors<'_, '_> {}
