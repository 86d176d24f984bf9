use std::{
    io::{Stdout, Write},
    str::FromStr,
    time::Duration,
};

use crossterm::{
    cursor, queue,
    style::Stylize,
    terminal::{self, ClearType},
};
use mazeshift::{
    game::{MazeState, StepOutcome},
    logging,
    maze::{CellType, MazeConfig},
};

/// Pause between rendered steps
const STEP_DELAY: Duration = Duration::from_millis(150);

/// Parse the positional argument, falling back to `default` when absent.
/// Returns `None` and prints a message if it is present but invalid.
fn parse_arg<T: FromStr>(arg: Option<String>, default: T, name: &str) -> Option<T> {
    match arg {
        None => Some(default),
        Some(s) => match s.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                eprintln!("Invalid {}: {:?}", name, s);
                None
            }
        },
    }
}

fn render(stdout: &mut Stdout, maze: &MazeState) -> std::io::Result<()> {
    queue!(
        stdout,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
    )?;
    write!(stdout, "{}", maze.grid())?;
    writeln!(
        stdout,
        "Moves: {}  Obstacles: {}",
        maze.game_log().len(),
        maze.grid().cells_of_type(CellType::Blocking).len()
    )?;
    stdout.flush()
}

fn main() -> std::io::Result<()> {
    let _log_guard = logging::init_file_logging(std::env::temp_dir(), "mazeshift.log");

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let defaults = MazeConfig::default();
    let Some(size) = parse_arg(args.next(), defaults.size, "size") else {
        return Ok(());
    };
    let Some(obstacle_count) = parse_arg(args.next(), defaults.obstacle_count, "obstacle count")
    else {
        return Ok(());
    };
    // Without a seed every run is different
    let seed = match args.next() {
        Some(arg) => match parse_arg(Some(arg), 0u64, "seed") {
            Some(seed) => Some(seed),
            None => return Ok(()),
        },
        None => None,
    };

    let config = MazeConfig {
        size,
        start: (0, 0),
        end: (size.saturating_sub(1), size.saturating_sub(1)),
        obstacle_count,
    };
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return Ok(());
    }

    let mut maze = MazeState::with_search(config, Default::default(), seed);
    let mut stdout = std::io::stdout();
    render(&mut stdout, &maze)?;

    loop {
        std::thread::sleep(STEP_DELAY);
        match maze.advance_one_step() {
            StepOutcome::Moved(_) => render(&mut stdout, &maze)?,
            StepOutcome::Finished(_) => {
                render(&mut stdout, &maze)?;
                println!("{}", "Goal reached!".green());
                break;
            }
            StepOutcome::AlreadyDone => break,
            StepOutcome::Stuck => {
                println!("{}", "The agent is stuck, no path to the goal.".red());
                break;
            }
        }
    }

    println!("{}", maze.log_json()?);
    Ok(())
}
