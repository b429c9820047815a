use crate::error::{Error, Result};
use crate::grid::GridSize;
use crate::robot::{Heading, Position, RobotSpec, RobotState};
use serde_json::{json, Value};
use std::{collections::BTreeMap, fs::File, io::BufWriter, io::Write, path::PathBuf};

pub fn create_replay_logger(filename: Option<String>, grid: GridSize) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, grid)),
    }
}

/// Records what each robot did so a run can be inspected afterwards.
///
/// Robots are identified by their 0-based index in the mission.
pub trait ReplayLogger {
    #[allow(unused_variables)]
    fn log_robot(&mut self, robot: usize, spec: &RobotSpec) {}

    #[allow(unused_variables)]
    fn log_result(&mut self, robot: usize, state: RobotState) {}

    #[allow(unused_variables)]
    fn log_scents(&mut self, scents: Vec<Position>) {}

    #[allow(unused_variables)]
    fn log_event(&mut self, robot: usize, event: Event) {}

    fn save(&self) -> Result<()> {
        Ok(())
    }

    fn log_turn(&mut self, robot: usize, location: Position, heading: Heading) {
        self.log_event(robot, Event::new(EventType::Turn, location, heading, None));
    }

    fn log_move(
        &mut self,
        robot: usize,
        location: Position,
        heading: Heading,
        destination: Position,
    ) {
        self.log_event(
            robot,
            Event::new(EventType::Move, location, heading, Some(destination)),
        );
    }

    fn log_scent_blocked(&mut self, robot: usize, location: Position, heading: Heading) {
        self.log_event(
            robot,
            Event::new(EventType::ScentBlocked, location, heading, None),
        );
    }

    fn log_lost(&mut self, robot: usize, location: Position, heading: Heading) {
        self.log_event(robot, Event::new(EventType::Lost, location, heading, None));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum EventType {
    Turn,
    Move,
    ScentBlocked,
    Lost,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Event {
    event_type: EventType,
    location: Position,
    heading: Heading,
    destination: Option<Position>,
}

impl Event {
    fn new(
        event_type: EventType,
        location: Position,
        heading: Heading,
        destination: Option<Position>,
    ) -> Event {
        Event {
            event_type,
            location,
            heading,
            destination,
        }
    }
}

struct RobotReplay {
    start: Position,
    heading: Heading,
    commands: String,
    events: Vec<Event>,
    result: Option<RobotState>,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

pub struct JsonReplayLogger {
    filename: String,
    grid: GridSize,
    robots: BTreeMap<usize, RobotReplay>,
    scents: Vec<Position>,
}

impl JsonReplayLogger {
    pub fn new(filename: String, grid: GridSize) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            grid,
            robots: BTreeMap::new(),
            scents: Vec::new(),
        }
    }

    /// The replay document that `save` writes.
    pub fn to_json(&self) -> Value {
        let robots: Vec<_> = self
            .robots
            .iter()
            .map(|(robot, replay)| {
                json!({
                    "robot": robot,
                    "start": {
                        "position": replay.start,
                        "heading": replay.heading,
                    },
                    "commands": replay.commands,
                    "events": replay.events,
                    "result": replay.result.map(|state| state.to_string()),
                })
            })
            .collect();

        json!({
            "grid": self.grid,
            "robots": robots,
            "scents": self.scents,
        })
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_robot(&mut self, robot: usize, spec: &RobotSpec) {
        self.robots.insert(
            robot,
            RobotReplay {
                start: spec.position,
                heading: spec.heading,
                commands: spec.commands.iter().map(|c| c.to_char()).collect(),
                events: Vec::new(),
                result: None,
            },
        );
    }

    fn log_result(&mut self, robot: usize, state: RobotState) {
        if let Some(replay) = self.robots.get_mut(&robot) {
            replay.result = Some(state);
        }
    }

    fn log_scents(&mut self, scents: Vec<Position>) {
        self.scents = scents;
    }

    fn log_event(&mut self, robot: usize, event: Event) {
        if let Some(replay) = self.robots.get_mut(&robot) {
            replay.events.push(event);
        }
    }

    fn save(&self) -> Result<()> {
        let write_error = |source| Error::ReplayWrite {
            path: PathBuf::from(&self.filename),
            source,
        };

        let file = File::create(&self.filename).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.to_json())
            .map_err(|err| write_error(err.into()))?;
        writer.flush().map_err(write_error)
    }
}
