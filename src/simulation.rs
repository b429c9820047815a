use crate::error::{Error, Result};
use crate::grid::{Grid, GridSize};
use crate::parser::Mission;
use crate::replay::{create_replay_logger, ReplayLogger};
use crate::robot::{Command, Position, RobotSpec, RobotState};
use tracing::{debug, info, warn};

/// The robot simulation, main entry point for running robots on a grid.
///
/// Robots run one at a time and the scents they leave behind are kept for every robot
/// that runs afterwards, so the order robots are given in matters.
pub struct Simulation {
    grid: Option<Grid>,
    robots_run: usize,
    replay_filename: Option<String>,
    replay_logger: Option<Box<dyn ReplayLogger>>,
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation::new()
    }
}

impl Simulation {
    /// Creates a simulation without a grid.
    ///
    /// Call [`initialize`](Self::initialize) before running robots.
    pub fn new() -> Simulation {
        Simulation {
            grid: None,
            robots_run: 0,
            replay_filename: None,
            replay_logger: None,
        }
    }

    /// Creates a simulation on a grid of the given size.
    pub fn with_grid(size: GridSize) -> Simulation {
        let mut simulation = Simulation::new();
        simulation.initialize(size);
        simulation
    }

    /// Records every robot run from now on, to be written to `filename` by
    /// [`save_replay`](Self::save_replay). `None` turns recording off.
    pub fn with_replay(mut self, filename: Option<String>) -> Simulation {
        self.replay_filename = filename;
        if let Some(grid) = &self.grid {
            self.replay_logger = Some(create_replay_logger(
                self.replay_filename.clone(),
                grid.size(),
            ));
        }
        self
    }

    /// Sets the grid for the run. Any scents from a previous grid are dropped.
    pub fn initialize(&mut self, size: GridSize) {
        if self.grid.is_some() {
            warn!("Reinitializing simulation, previous scents are discarded");
        }

        self.grid = Some(Grid::new(size));
        self.robots_run = 0;
        self.replay_logger = Some(create_replay_logger(self.replay_filename.clone(), size));
    }

    pub fn is_initialized(&self) -> bool {
        self.grid.is_some()
    }

    /// The positions where robots have been lost so far, ordered by `x` then `y`.
    pub fn scents(&self) -> Vec<Position> {
        self.grid.as_ref().map(Grid::scents).unwrap_or_default()
    }

    /// Runs a robot through all of its commands and returns where it ended up.
    ///
    /// A robot that moves off the grid is lost and ignores the rest of its commands.
    /// Its last position on the grid is scented, and from then on any robot trying to
    /// move off the grid from that position stays where it is instead.
    ///
    /// A robot whose start position is not on the grid is rejected with
    /// [`Error::StartOutsideGrid`] and leaves no scent.
    pub fn run(&mut self, spec: &RobotSpec) -> Result<RobotState> {
        let Some(grid) = self.grid.as_mut() else {
            return Err(Error::EngineNotInitialized);
        };
        if !grid.contains(spec.position) {
            let size = grid.size();
            return Err(Error::StartOutsideGrid {
                x: spec.position.x,
                y: spec.position.y,
                max_x: size.max_x(),
                max_y: size.max_y(),
            });
        }
        let robot = self.robots_run;
        self.robots_run += 1;

        let mut replay = self.replay_logger.as_deref_mut();
        if let Some(replay) = replay.as_mut() {
            replay.log_robot(robot, spec);
        }

        let mut state = RobotState::from(spec);

        for command in &spec.commands {
            match command {
                Command::Left => {
                    state.heading = state.heading.left();
                    if let Some(replay) = replay.as_mut() {
                        replay.log_turn(robot, state.position, state.heading);
                    }
                }
                Command::Right => {
                    state.heading = state.heading.right();
                    if let Some(replay) = replay.as_mut() {
                        replay.log_turn(robot, state.position, state.heading);
                    }
                }
                Command::Forward => {
                    let from = state.position;
                    match state.heading.step(from).filter(|to| grid.contains(*to)) {
                        Some(to) => {
                            state.position = to;
                            if let Some(replay) = replay.as_mut() {
                                replay.log_move(robot, from, state.heading, to);
                            }
                        }
                        // Scents are kept at the last cell on the grid, not the cell off it
                        None if grid.has_scent(from) => {
                            debug!(
                                robot,
                                x = from.x,
                                y = from.y,
                                "Move off the grid blocked by scent"
                            );
                            if let Some(replay) = replay.as_mut() {
                                replay.log_scent_blocked(robot, from, state.heading);
                            }
                        }
                        None => {
                            state.lost = true;
                            if let Some(replay) = replay.as_mut() {
                                replay.log_lost(robot, from, state.heading);
                            }
                            // Anything after falling off is ignored
                            break;
                        }
                    }
                }
            }
        }

        if state.lost {
            grid.leave_scent(state.position);
            info!(
                robot,
                x = state.position.x,
                y = state.position.y,
                heading = %state.heading,
                "Robot lost, scent left"
            );
        } else {
            debug!(robot, result = %state, "Robot finished");
        }

        if let Some(replay) = replay {
            replay.log_result(robot, state);
        }

        Ok(state)
    }

    /// Sets the grid from `mission` and runs its robots in order.
    pub fn run_mission(&mut self, mission: &Mission) -> Result<Vec<RobotState>> {
        self.initialize(mission.grid);

        mission.robots.iter().map(|spec| self.run(spec)).collect()
    }

    /// Writes the replay, if one was requested.
    pub fn save_replay(&mut self) -> Result<()> {
        let scents = self.scents();
        match self.replay_logger.as_deref_mut() {
            Some(replay) => {
                replay.log_scents(scents);
                replay.save()
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::Command::{Forward, Left, Right};
    use crate::grid::MAX_COORDINATE;
    use crate::robot::Heading;

    fn simulation(max_x: usize, max_y: usize) -> Simulation {
        Simulation::with_grid(GridSize::new(max_x, max_y).unwrap())
    }

    fn robot(x: usize, y: usize, heading: Heading, commands: &[Command]) -> RobotSpec {
        RobotSpec::new(Position::new(x, y), heading, commands.to_vec())
    }

    fn state(x: usize, y: usize, heading: Heading, lost: bool) -> RobotState {
        RobotState {
            position: Position::new(x, y),
            heading,
            lost,
        }
    }

    #[test]
    fn when_running_without_a_grid_it_fails_with_engine_not_initialized() {
        let mut simulation = Simulation::new();

        let result = simulation.run(&robot(0, 0, Heading::North, &[Forward]));

        assert!(matches!(result, Err(Error::EngineNotInitialized)));
        assert!(!simulation.is_initialized());
    }

    #[test]
    fn when_a_robot_starts_outside_the_grid_it_is_rejected_and_leaves_no_scent() {
        let mut simulation = simulation(5, 3);

        let result = simulation.run(&robot(6, 1, Heading::East, &[Forward]));

        assert!(matches!(
            result,
            Err(Error::StartOutsideGrid {
                x: 6,
                y: 1,
                max_x: 5,
                max_y: 3
            })
        ));
        assert!(simulation.scents().is_empty());
    }

    #[test]
    fn when_a_robot_on_the_largest_grid_drives_off_the_top_it_is_lost() {
        let mut simulation = simulation(MAX_COORDINATE, MAX_COORDINATE);

        let result = simulation
            .run(&robot(0, MAX_COORDINATE, Heading::North, &[Forward]))
            .unwrap();

        assert_eq!(result, state(0, MAX_COORDINATE, Heading::North, true));
    }

    #[test]
    fn when_running_a_robot_without_commands_its_state_is_unchanged() {
        let mut simulation = simulation(5, 3);

        let result = simulation.run(&robot(2, 1, Heading::West, &[])).unwrap();

        assert_eq!(result, state(2, 1, Heading::West, false));
    }

    #[test]
    fn when_turning_the_position_never_changes() {
        let mut simulation = simulation(0, 0);

        let result = simulation
            .run(&robot(0, 0, Heading::North, &[Left, Left, Right]))
            .unwrap();

        assert_eq!(result, state(0, 0, Heading::West, false));
    }

    #[test]
    fn when_moving_forward_inside_the_grid_the_robot_moves_along_its_heading() {
        let mut simulation = simulation(5, 3);

        let result = simulation
            .run(&robot(1, 1, Heading::North, &[Forward, Right, Forward, Forward]))
            .unwrap();

        assert_eq!(result, state(3, 2, Heading::East, false));
    }

    #[test]
    fn when_moving_off_the_grid_the_robot_is_lost_at_its_last_position() {
        let mut simulation = simulation(5, 3);

        let result = simulation
            .run(&robot(5, 1, Heading::East, &[Forward]))
            .unwrap();

        assert_eq!(result, state(5, 1, Heading::East, true));
        assert_eq!(simulation.scents(), vec![Position::new(5, 1)]);
    }

    #[test]
    fn when_moving_off_below_zero_the_robot_is_lost() {
        let mut simulation = simulation(5, 3);

        let result = simulation
            .run(&robot(0, 0, Heading::South, &[Forward]))
            .unwrap();

        assert_eq!(result, state(0, 0, Heading::South, true));
        assert_eq!(simulation.scents(), vec![Position::new(0, 0)]);
    }

    #[test]
    fn when_a_robot_is_lost_its_remaining_commands_are_ignored() {
        let mut simulation = simulation(5, 3);

        let result = simulation
            .run(&robot(0, 3, Heading::North, &[Forward, Right, Forward, Forward]))
            .unwrap();

        assert_eq!(result, state(0, 3, Heading::North, true));
    }

    #[test]
    fn when_a_later_robot_reaches_a_scent_it_stays_on_the_grid() {
        let mut simulation = simulation(5, 3);
        simulation
            .run(&robot(3, 3, Heading::North, &[Forward]))
            .unwrap();

        let result = simulation
            .run(&robot(3, 2, Heading::North, &[Forward, Forward]))
            .unwrap();

        assert_eq!(result, state(3, 3, Heading::North, false));
        assert_eq!(simulation.scents(), vec![Position::new(3, 3)]);
    }

    #[test]
    fn when_a_scent_blocks_a_move_later_commands_still_run() {
        let mut simulation = simulation(5, 3);
        simulation
            .run(&robot(3, 3, Heading::North, &[Forward]))
            .unwrap();

        let result = simulation
            .run(&robot(3, 3, Heading::North, &[Forward, Left, Forward]))
            .unwrap();

        assert_eq!(result, state(2, 3, Heading::West, false));
    }

    #[test]
    fn when_a_scent_exists_robots_can_still_be_lost_from_other_positions() {
        let mut simulation = simulation(5, 3);
        simulation
            .run(&robot(3, 3, Heading::North, &[Forward]))
            .unwrap();

        let result = simulation
            .run(&robot(2, 3, Heading::North, &[Forward]))
            .unwrap();

        assert!(result.lost);
        assert_eq!(
            simulation.scents(),
            vec![Position::new(2, 3), Position::new(3, 3)]
        );
    }

    #[test]
    fn when_a_scent_exists_it_protects_every_heading_leaving_from_that_cell() {
        let mut simulation = simulation(5, 3);
        simulation
            .run(&robot(5, 3, Heading::North, &[Forward]))
            .unwrap();

        let result = simulation
            .run(&robot(5, 3, Heading::East, &[Forward]))
            .unwrap();

        assert_eq!(result, state(5, 3, Heading::East, false));
    }

    #[test]
    fn when_reinitializing_the_scents_are_cleared() {
        let mut simulation = simulation(5, 3);
        simulation
            .run(&robot(3, 3, Heading::North, &[Forward]))
            .unwrap();

        simulation.initialize(GridSize::new(5, 3).unwrap());

        assert!(simulation.scents().is_empty());
        let result = simulation
            .run(&robot(3, 3, Heading::North, &[Forward]))
            .unwrap();
        assert!(result.lost);
    }

    #[test]
    fn when_running_a_mission_robots_run_in_order_and_share_scents() {
        let mission = Mission {
            grid: GridSize::new(5, 3).unwrap(),
            robots: vec![
                robot(3, 3, Heading::North, &[Forward]),
                robot(3, 3, Heading::North, &[Forward]),
            ],
        };
        let mut simulation = Simulation::new();

        let results = simulation.run_mission(&mission).unwrap();

        assert_eq!(
            results,
            vec![
                state(3, 3, Heading::North, true),
                state(3, 3, Heading::North, false),
            ]
        );
    }
}
