use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// A cell on the grid. The lower-left corner is `(0, 0)`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Position {
        Position { x, y }
    }
}

/// Represents the direction a robot is facing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub fn from_char(value: char) -> Option<Heading> {
        match value {
            'N' => Some(Heading::North),
            'E' => Some(Heading::East),
            'S' => Some(Heading::South),
            'W' => Some(Heading::West),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }

    /// Turns 90 degrees clockwise.
    pub fn right(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// Turns 90 degrees counter-clockwise.
    pub fn left(self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// The cell one step ahead of `from`.
    /// `None` when the coordinate would leave the range of `usize`, which is always off the grid.
    pub fn step(self, from: Position) -> Option<Position> {
        let Position { x, y } = from;
        match self {
            Heading::North => y.checked_add(1).map(|y| Position::new(x, y)),
            Heading::East => x.checked_add(1).map(|x| Position::new(x, y)),
            Heading::South => y.checked_sub(1).map(|y| Position::new(x, y)),
            Heading::West => x.checked_sub(1).map(|x| Position::new(x, y)),
        }
    }
}

impl Distribution<Heading> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Heading {
        match rng.gen_range(0..4) {
            0 => Heading::North,
            1 => Heading::East,
            2 => Heading::South,
            _ => Heading::West,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// An instruction a robot can receive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Command {
    Left,
    Right,
    Forward,
}

impl Command {
    pub fn from_char(value: char) -> Option<Command> {
        match value {
            'L' => Some(Command::Left),
            'R' => Some(Command::Right),
            'F' => Some(Command::Forward),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Command::Left => 'L',
            Command::Right => 'R',
            Command::Forward => 'F',
        }
    }
}

/// A robot as read from the input: where it lands and what it is told to do.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotSpec {
    pub position: Position,
    pub heading: Heading,
    pub commands: Vec<Command>,
}

impl RobotSpec {
    pub fn new(position: Position, heading: Heading, commands: Vec<Command>) -> RobotSpec {
        RobotSpec {
            position,
            heading,
            commands,
        }
    }
}

/// Represents where a robot is and whether it fell off the grid.
///
/// For a lost robot, `position` and `heading` are the last ones it had on the grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct RobotState {
    pub position: Position,
    pub heading: Heading,
    pub lost: bool,
}

impl From<&RobotSpec> for RobotState {
    fn from(spec: &RobotSpec) -> RobotState {
        RobotState {
            position: spec.position,
            heading: spec.heading,
            lost: false,
        }
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.position.x, self.position.y, self.heading)?;
        if self.lost {
            write!(f, " LOST")?;
        }
        Ok(())
    }
}
