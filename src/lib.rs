//! # martian_robots
//!
//! Simulates robots exploring a rectangular grid on Mars.
//! Robots that drive off the grid are lost, but leave a scent that keeps later robots
//! from being lost at the same spot.
//!
//! ```
//! use martian_robots::{parse, Simulation};
//!
//! let mission = parse("5 3\n1 1 E\nRFRFRFRF").unwrap();
//! let results = Simulation::new().run_mission(&mission).unwrap();
//!
//! assert_eq!(results[0].to_string(), "1 1 E");
//! ```

pub mod error;
pub mod grid;
pub mod parser;
pub mod replay;
pub mod robot;
pub mod simulation;

pub use error::{Error, Result};
pub use grid::{GridSize, MAX_COORDINATE};
pub use parser::{parse, Mission};
pub use robot::{Command, Heading, Position, RobotSpec, RobotState};
pub use simulation::Simulation;
