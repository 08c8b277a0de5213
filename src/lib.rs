// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![allow(unknown_lints)] // necessary because rustc doesn't know about clippy
#![warn(clippy::all)]

pub mod config;
pub mod data;
pub mod level;
pub mod map_formatter;
pub mod moves;
pub mod parser;
pub mod state;
pub mod transition;

pub use crate::config::Format;
pub use crate::data::{Dir, Pos, DIRECTIONS, DOWN, LEFT, RIGHT, UP};
pub use crate::level::{Level, Map, ValidationErr};
pub use crate::moves::{Move, Moves, MovesErr};
pub use crate::parser::ParserErr;
pub use crate::state::{History, State};
pub use crate::transition::Transition;
