use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use log::debug;

use crate::data::Pos;
use crate::level::{Level, ValidationErr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    NoPlayer,
    MultiplePlayers,
    Invalid(ValidationErr),
}

impl ParserErr {
    /// Wrong number of players.
    pub fn is_malformed(&self) -> bool {
        match *self {
            ParserErr::NoPlayer | ParserErr::MultiplePlayers => true,
            _ => false,
        }
    }
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::NotRectangular {
                row,
                expected,
                found,
            } => write!(
                f,
                "Level is not a rectangle: row {} has {} cells, expected {}",
                row, found, expected
            ),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::Invalid(err) => write!(f, "Invalid level: {}", err),
        }
    }
}

impl Error for ParserErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParserErr::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationErr> for ParserErr {
    fn from(err: ValidationErr) -> Self {
        ParserErr::Invalid(err)
    }
}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses a level where `#` is a wall, `O` a goal, `*` a box, `@` a box on a goal
/// and `P` or `p` the player. Anything else is floor.
///
/// Blank lines around the level, indentation shared by all lines
/// and trailing whitespace are ignored so levels can be written as indented raw strings.
pub fn parse(level: &str) -> Result<Level, ParserErr> {
    let rows = trim_rows(level);

    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut walls = Vec::new();
    let mut players = Vec::new();

    let width = rows.first().map_or(0, |row| row.chars().count());
    for (r, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(ParserErr::NotRectangular {
                row: r,
                expected: width,
                found,
            });
        }

        for (c, cur_char) in row.chars().enumerate() {
            let pos = Pos::new(c as i32, r as i32);
            match cur_char {
                '#' => walls.push(pos),
                'O' => goals.push(pos),
                '*' => boxes.push(pos),
                '@' => {
                    goals.push(pos);
                    boxes.push(pos);
                }
                'P' | 'p' => players.push(pos),
                _ => {}
            }
        }
    }

    let player = match players.len() {
        0 => return Err(ParserErr::NoPlayer),
        1 => players[0],
        _ => return Err(ParserErr::MultiplePlayers),
    };

    debug!(
        "Parsed {}x{} level: {} walls, {} goals, {} boxes",
        width,
        rows.len(),
        walls.len(),
        goals.len(),
        boxes.len()
    );

    Ok(Level::new(player, goals, boxes, walls)?)
}

fn trim_rows(level: &str) -> Vec<&str> {
    let lines: Vec<&str> = level.lines().map(str::trim_end).collect();

    let first = match lines.iter().position(|line| !line.is_empty()) {
        Some(first) => first,
        None => return Vec::new(),
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);
    let lines = &lines[first..=last];

    let indent = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|&line| match line.char_indices().nth(indent) {
            Some((i, _)) => &line[i..],
            None => "",
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Pos {
        Pos::new(x, y)
    }

    fn sorted(positions: &[Pos]) -> Vec<Pos> {
        let mut v = positions.to_vec();
        v.sort();
        v
    }

    #[test]
    fn simplest() {
        let level: Level = r"
#####
#P*O#
#####
"
        .parse()
        .unwrap();

        assert_eq!(level.player(), p(1, 1));
        assert_eq!(level.boxes(), &[p(2, 1)]);
        assert_eq!(level.map().goals(), &[p(3, 1)]);

        let walls: Vec<_> = level.map().walls().iter().cloned().collect();
        assert_eq!(
            sorted(&walls),
            sorted(&[
                p(0, 0),
                p(1, 0),
                p(2, 0),
                p(3, 0),
                p(4, 0),
                p(0, 1),
                p(4, 1),
                p(0, 2),
                p(1, 2),
                p(2, 2),
                p(3, 2),
                p(4, 2),
            ])
        );
    }

    #[test]
    fn box_on_goal() {
        let level: Level = r"
.#P
*O@
"
        .parse()
        .unwrap();

        assert_eq!(level.player(), p(2, 0));
        let walls: Vec<_> = level.map().walls().iter().cloned().collect();
        assert_eq!(walls, [p(1, 0)]);
        assert_eq!(level.boxes(), &[p(0, 1), p(2, 1)]);
        assert_eq!(level.map().goals(), &[p(1, 1), p(2, 1)]);
    }

    #[test]
    fn lowercase_player() {
        let level: Level = "#p #".parse().unwrap();
        assert_eq!(level.player(), p(1, 0));
        assert_eq!(level.map().walls().len(), 2);
    }

    #[test]
    fn indentation() {
        let indented = "
        ####..
        #.O#..
        #..###
        #@P..#
        #..*.#
        #..###
        ####..
    ";
        let level: Level = indented.parse().unwrap();
        assert_eq!(level.player(), p(2, 3));
        assert_eq!(level.boxes(), &[p(1, 3), p(3, 4)]);
        assert_eq!(level.map().goals(), &[p(2, 1), p(1, 3)]);

        // trailing whitespace and windows line endings
        let level: Level = "  #P#   \r\n  #.#\r\n".parse().unwrap();
        assert_eq!(level.player(), p(1, 0));
    }

    #[test]
    fn not_rectangular() {
        let level = r"
#####
#P*O#
####
";
        assert_eq!(
            level.parse::<Level>().unwrap_err(),
            ParserErr::NotRectangular {
                row: 2,
                expected: 5,
                found: 4,
            }
        );

        // only indentation shared by all lines is removed
        let level = "  ###\n   #P#\n  ###";
        assert_eq!(
            level.parse::<Level>().unwrap_err(),
            ParserErr::NotRectangular {
                row: 1,
                expected: 3,
                found: 4,
            }
        );

        // blank lines inside the level are rows too
        let level = "#P#\n\n###";
        let err = level.parse::<Level>().unwrap_err();
        assert_eq!(
            err,
            ParserErr::NotRectangular {
                row: 1,
                expected: 3,
                found: 0,
            }
        );
        assert!(!err.is_malformed());
    }

    #[test]
    fn no_player() {
        for level in &["", "\n  \n", "###\n#.#\n###"] {
            let err = level.parse::<Level>().unwrap_err();
            assert_eq!(err, ParserErr::NoPlayer);
            assert!(err.is_malformed());
        }
    }

    #[test]
    fn multiple_players() {
        let level = r"
#####
#P.P#
#####
";
        let err = level.parse::<Level>().unwrap_err();
        assert_eq!(err, ParserErr::MultiplePlayers);
        assert!(err.is_malformed());
        assert_eq!("Pp".parse::<Level>().unwrap_err(), ParserErr::MultiplePlayers);
    }

    #[test]
    fn invalid() {
        let err = "P**O".parse::<Level>().unwrap_err();
        assert_eq!(err, ParserErr::Invalid(ValidationErr::BoxesGoals));
        assert!(!err.is_malformed());
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Invalid level: Different number of boxes and goals");

        let err = "P@@O".parse::<Level>().unwrap_err();
        assert_eq!(err, ParserErr::Invalid(ValidationErr::BoxesGoals));
    }

    #[test]
    fn unknown_chars_are_floor() {
        let level: Level = "P-_ x.$+".parse().unwrap();
        assert_eq!(level.player(), p(0, 0));
        assert!(level.boxes().is_empty());
        assert!(level.map().goals().is_empty());
        assert!(level.map().walls().is_empty());
    }
}
