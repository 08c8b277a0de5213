use std::error::Error;
use std::fs;
use std::io::{self, BufRead};
use std::process;

use clap::{App, Arg};
use log::{debug, info};

use sokoban_rules::{Format, History, Level, Moves, State, DOWN, LEFT, RIGHT, UP};

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-rules")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plays box-pushing levels in the terminal")
        .arg(
            Arg::with_name("xsb")
                .short("x")
                .long("xsb")
                .help("print states in XSB format instead of the level format"),
        )
        .arg(
            Arg::with_name("moves")
                .short("m")
                .long("moves")
                .takes_value(true)
                .value_name("MOVES")
                .help("replay moves in LURD notation instead of playing interactively"),
        )
        .arg(
            Arg::with_name("steps")
                .short("s")
                .long("steps")
                .requires("moves")
                .help("print every state while replaying"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let format = if matches.is_present("xsb") {
        Format::Xsb
    } else {
        Format::Ascii
    };
    let path = matches.value_of("file").unwrap();

    let level = load_level(path).unwrap_or_else(|err| {
        println!("Can't load level {}: {}", path, err);
        process::exit(1);
    });
    info!("Loaded level {}", path);

    let history = History::new();
    let root = history.start(&level);

    match matches.value_of("moves") {
        Some(moves) => {
            let moves: Moves = moves.parse().unwrap_or_else(|err| {
                println!("Invalid moves: {}", err);
                process::exit(1);
            });
            replay(root, &moves, format, matches.is_present("steps"));
        }
        None => play(root, format),
    }
}

fn load_level(path: &str) -> Result<Level, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(text.parse()?)
}

fn replay<'a>(root: &'a State<'a>, moves: &Moves, format: Format, steps: bool) {
    println!("{}", root.format(format));

    let mut state = root;
    for mov in moves {
        state = state.move_towards(mov.dir());
        if steps {
            println!("{}", state.format(format));
        }
    }
    if !steps && moves.move_cnt() > 0 {
        println!("{}", state.format(format));
    }

    print_summary(state);
    if state.is_solved() {
        println!("Solved");
    } else {
        println!("Not solved");
    }
}

fn play<'a>(root: &'a State<'a>, format: Format) {
    println!("{}", root.format(format));
    if root.is_solved() {
        print_solved(root, format);
        return;
    }
    println!("Move with w/a/s/d, z to undo, r to restart, q to quit");

    let stdin = io::stdin();
    let mut state = root;
    for line in stdin.lock().lines() {
        let line = line.unwrap_or_else(|err| {
            println!("Can't read input: {}", err);
            process::exit(1);
        });

        for c in line.chars().filter(|c| !c.is_whitespace()) {
            state = match c {
                'w' => state.move_towards(UP),
                'a' => state.move_towards(LEFT),
                's' => state.move_towards(DOWN),
                'd' => state.move_towards(RIGHT),
                'z' => state.undo(),
                'r' => state.restart(),
                'q' => return,
                _ => {
                    println!("Unknown command: {}", c);
                    continue;
                }
            };
            debug!("{:?}", state.transition());

            if state.is_solved() {
                print_solved(state, format);
                return;
            }
        }

        println!("{}", state.format(format));
    }
}

fn print_solved(state: &State<'_>, format: Format) {
    println!("Solved!");
    print_summary(state);
    println!("Replaying backwards:");
    for prev in state.history() {
        println!("{}", prev.format(format));
    }
}

fn print_summary(state: &State<'_>) {
    let moves = state.moves();
    println!("{}", moves);
    println!("Moves: {}", moves.move_cnt());
    println!("Pushes: {}", moves.push_cnt());
}
