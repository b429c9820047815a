//! Reads the mission text: a grid size line followed by pairs of position and command lines.

use crate::error::{Error, Result};
use crate::grid::GridSize;
use crate::robot::{Command, Heading, Position, RobotSpec};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

static GRID_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)$").expect("grid line pattern is valid"));

static ROBOT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(\d+)\s+([NESW])$").expect("robot line pattern is valid")
});

/// A parsed mission: the grid and the robots to run on it, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct Mission {
    pub grid: GridSize,
    pub robots: Vec<RobotSpec>,
}

/// Parses a whole mission.
///
/// The first line must be the grid size. Blank lines after it are skipped and the
/// remaining lines are taken two at a time as a robot's position and its commands.
/// The first problem found aborts the parse; nothing partial is returned.
pub fn parse(input: &str) -> Result<Mission> {
    // Line numbers are 1-based so errors point at what an editor shows
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()));

    let first = lines.next().map_or("", |(_, line)| line);
    let grid = parse_grid_size(first)?;

    let lines: Vec<(usize, &str)> = lines.filter(|(_, line)| !line.is_empty()).collect();
    let robots = lines
        .chunks(2)
        .map(|block| {
            let (line, position) = block[0];
            match block.get(1) {
                Some(&(command_line, commands)) => {
                    let mut robot = parse_robot_line(grid, line, position)?;
                    robot.commands = parse_commands(command_line, commands)?;
                    Ok(robot)
                }
                None => Err(Error::MalformedInput {
                    line,
                    reason: format!("robot {position:?} has no command line"),
                }),
            }
        })
        .collect::<Result<Vec<RobotSpec>>>()?;

    info!(
        max_x = grid.max_x(),
        max_y = grid.max_y(),
        robots = robots.len(),
        "Parsed mission"
    );

    Ok(Mission { grid, robots })
}

/// Parses the `<maxX> <maxY>` line.
pub fn parse_grid_size(line: &str) -> Result<GridSize> {
    let invalid = |reason: &str| Error::InvalidGridSize {
        value: line.to_string(),
        reason: reason.to_string(),
    };

    let captures = GRID_LINE
        .captures(line.trim())
        .ok_or_else(|| invalid("expected two non-negative integers"))?;

    let max_x = captures[1]
        .parse()
        .map_err(|_| invalid("x is not a valid integer"))?;
    let max_y = captures[2]
        .parse()
        .map_err(|_| invalid("y is not a valid integer"))?;

    GridSize::new(max_x, max_y).map_err(|err| match err {
        Error::InvalidGridSize { reason, .. } => invalid(&reason),
        other => other,
    })
}

/// Parses a `<x> <y> <N|E|S|W>` line. The position must lie on `grid`.
pub fn parse_robot_line(grid: GridSize, line: usize, value: &str) -> Result<RobotSpec> {
    let invalid = |reason: String| Error::InvalidRobotLine {
        line,
        value: value.to_string(),
        reason,
    };

    let captures = ROBOT_LINE
        .captures(value.trim())
        .ok_or_else(|| invalid("expected `<x> <y> <N|E|S|W>`".to_string()))?;

    let x = captures[1]
        .parse()
        .map_err(|_| invalid("x is not a valid integer".to_string()))?;
    let y = captures[2]
        .parse()
        .map_err(|_| invalid("y is not a valid integer".to_string()))?;
    let heading = captures[3]
        .chars()
        .next()
        .and_then(Heading::from_char)
        .ok_or_else(|| invalid("unknown heading".to_string()))?;

    let position = Position::new(x, y);
    if !grid.contains(position) {
        return Err(invalid(format!(
            "position is outside the grid {} {}",
            grid.max_x(),
            grid.max_y()
        )));
    }

    debug!(line, x, y, heading = %heading, "Parsed robot");

    Ok(RobotSpec::new(position, heading, Vec::new()))
}

/// Parses a command line made of `L`, `R` and `F`.
pub fn parse_commands(line: usize, value: &str) -> Result<Vec<Command>> {
    value
        .trim()
        .chars()
        .map(|command| {
            Command::from_char(command).ok_or_else(|| Error::InvalidCommand {
                line,
                command,
                value: value.to_string(),
            })
        })
        .collect()
}
