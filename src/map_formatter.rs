use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;

use crate::config::Format;
use crate::data::Pos;
use crate::level::{self, Map};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Contents {
    Empty,
    Box,
    Player,
}

/// At most this many rows and columns are drawn.
pub const MAX_SIDE: i32 = 1024;

/// Draws the whole `level_size()` rectangle, one line per row,
/// cut to `MAX_SIDE` in both directions.
#[derive(Clone, Copy)]
pub struct MapFormatter<'a> {
    map: &'a Map,
    player: Pos,
    boxes: &'a [Pos],
    format: Format,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(map: &'a Map, player: Pos, boxes: &'a [Pos], format: Format) -> Self {
        Self {
            map,
            player,
            boxes,
            format,
        }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (cols, rows) = level::level_size(self.map, self.player, self.boxes);
        let cols = cols.max(0).min(MAX_SIDE);
        let rows = rows.max(0).min(MAX_SIDE);
        let boxes: FnvHashSet<Pos> = self.boxes.iter().cloned().collect();

        for r in 0..rows {
            let mut line = String::with_capacity(cols as usize);
            for c in 0..cols {
                let pos = Pos::new(c, r);
                let contents = if pos == self.player {
                    Contents::Player
                } else if boxes.contains(&pos) {
                    Contents::Box
                } else {
                    Contents::Empty
                };
                let is_wall = self.map.is_wall(pos);
                let is_goal = self.map.is_goal(pos);

                line.push(match self.format {
                    Format::Ascii => Self::cell_ascii(is_wall, is_goal, contents),
                    Format::Xsb => Self::cell_xsb(is_wall, is_goal, contents),
                });
            }

            // don't print trailing empty cells to match how XSB levels are usually written
            if self.format == Format::Xsb {
                writeln!(f, "{}", line.trim_end_matches(' '))?;
            } else {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }

    fn cell_ascii(is_wall: bool, is_goal: bool, contents: Contents) -> char {
        match (is_wall, is_goal, contents) {
            (true, _, _) => '#',
            (false, _, Contents::Player) => 'P',
            (false, true, Contents::Box) => '@',
            (false, false, Contents::Box) => '*',
            (false, true, Contents::Empty) => 'O',
            (false, false, Contents::Empty) => '.',
        }
    }

    fn cell_xsb(is_wall: bool, is_goal: bool, contents: Contents) -> char {
        match (is_wall, is_goal, contents) {
            (true, _, _) => '#',
            (false, false, Contents::Empty) => ' ',
            (false, false, Contents::Box) => '$',
            (false, false, Contents::Player) => '@',
            (false, true, Contents::Empty) => '.',
            (false, true, Contents::Box) => '*',
            (false, true, Contents::Player) => '+',
        }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::MAX_SIDE;
    use crate::config::Format;
    use crate::data::{Pos, LEFT, RIGHT, UP};
    use crate::level::Level;
    use crate::state::History;

    const LEVEL: &str = r"
####..
#.O#..
#..###
#@P..#
#..*.#
#..###
####..
";

    #[test]
    fn formatting_level() {
        let level: Level = LEVEL.parse().unwrap();
        let ascii = LEVEL.trim_start_matches('\n');
        assert_eq!(level.to_string(), ascii);
        assert_eq!(level.format(Format::Ascii).to_string(), ascii);
        assert_eq!(format!("{:?}", level.format(Format::Ascii)), ascii);

        let xsb = r"
####
# .#
#  ###
#*@  #
#  $ #
#  ###
####
"
        .trim_start_matches('\n');
        assert_eq!(level.format(Format::Xsb).to_string(), xsb);
    }

    #[test]
    fn formatting_states() {
        let level: Level = LEVEL.parse().unwrap();
        let history = History::new();
        let root = history.start(&level);
        assert_eq!(root.to_string(), LEVEL.trim_start_matches('\n'));

        // walk onto the goal and bump into the wall above it
        let state = root.move_towards(UP).move_towards(UP).move_towards(UP);
        let expected = r"
####..
#.P#..
#..###
#@...#
#..*.#
#..###
####..
"
        .trim_start_matches('\n');
        assert_eq!(state.to_string(), expected);
        let expected_xsb = r"
####
# +#
#  ###
#*   #
#  $ #
#  ###
####
"
        .trim_start_matches('\n');
        assert_eq!(state.xsb().to_string(), expected_xsb);

        let debug = format!("{:?}", state);
        assert!(debug.starts_with("WallBump"));
        assert!(debug.ends_with(expected));
    }

    #[test]
    fn formatting_pushes() {
        let level: Level = "P*.O".parse().unwrap();
        let history = History::new();
        let state = history.start(&level).move_towards(RIGHT).move_towards(RIGHT);
        assert_eq!(state.to_string(), "..P@\n");
        assert_eq!(state.xsb().to_string(), "  @*\n");
    }

    #[test]
    fn far_positions_are_cut() {
        let level = Level::with_player(Pos::new(5000, 0));
        let line = format!("{}\n", ".".repeat(MAX_SIDE as usize));
        assert_eq!(level.to_string(), line);
        assert_eq!(level.format(Format::Xsb).to_string(), "\n");

        let level = Level::with_player(Pos::new(i32::MAX, i32::MAX));
        let history = History::new();
        let state = history.start(&level).move_towards(RIGHT);
        assert_eq!(state.player(), Pos::new(i32::MIN, i32::MAX));
        assert_eq!(state.level_size(), (i32::MIN + 1, i32::MAX));
        assert_eq!(state.to_string(), "\n".repeat(MAX_SIDE as usize));

        let drawn = level.to_string();
        assert_eq!(drawn.lines().count(), MAX_SIDE as usize);
        assert!(drawn.lines().all(|l| l == &line[..line.len() - 1]));
    }

    #[test]
    fn negative_positions_are_skipped() {
        let level = Level::with_player(Pos::new(0, 0));
        let history = History::new();
        let state = history.start(&level).move_towards(LEFT);
        assert_eq!(state.player(), Pos::new(-1, 0));
        assert_eq!(state.level_size(), (0, 1));
        assert_eq!(state.to_string(), "\n");

        let far = state.move_towards(UP).move_towards(UP);
        assert_eq!(far.level_size(), (0, -1));
        assert_eq!(far.to_string(), "");
    }
}
