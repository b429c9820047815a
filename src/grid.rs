use crate::error::{Error, Result};
use crate::robot::Position;
use serde::Serialize;
use std::collections::HashSet;

/// Largest coordinate allowed for the upper-right corner.
pub const MAX_COORDINATE: usize = 50;

/// The upper-right corner of the grid. The lower-left corner is always `(0, 0)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct GridSize {
    max_x: usize,
    max_y: usize,
}

impl GridSize {
    pub fn new(max_x: usize, max_y: usize) -> Result<GridSize> {
        if let Some(value) = [max_x, max_y].into_iter().find(|v| *v > MAX_COORDINATE) {
            return Err(Error::InvalidGridSize {
                value: format!("{max_x} {max_y}"),
                reason: format!("{value} exceeds {MAX_COORDINATE}"),
            });
        }

        Ok(GridSize { max_x, max_y })
    }

    pub fn max_x(&self) -> usize {
        self.max_x
    }

    pub fn max_y(&self) -> usize {
        self.max_y
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x <= self.max_x && position.y <= self.max_y
    }
}

/// The bounded surface robots move on, along with the scents left by lost robots.
#[derive(Clone, Debug)]
pub struct Grid {
    size: GridSize,
    scents: HashSet<Position>,
}

impl Grid {
    pub fn new(size: GridSize) -> Grid {
        Grid {
            size,
            scents: HashSet::new(),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn contains(&self, position: Position) -> bool {
        self.size.contains(position)
    }

    pub fn has_scent(&self, position: Position) -> bool {
        self.scents.contains(&position)
    }

    /// Marks `position` so no later robot is lost from it. Returns `false` if it was already marked.
    pub fn leave_scent(&mut self, position: Position) -> bool {
        self.scents.insert(position)
    }

    /// All scents, ordered by `x` then `y`.
    pub fn scents(&self) -> Vec<Position> {
        let mut scents: Vec<Position> = self.scents.iter().copied().collect();
        scents.sort();
        scents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_creating_a_grid_size_up_to_fifty_it_is_accepted() {
        assert!(GridSize::new(0, 0).is_ok());
        assert!(GridSize::new(50, 50).is_ok());
        assert!(GridSize::new(5, 3).is_ok());
    }

    #[test]
    fn when_creating_a_grid_size_above_fifty_it_is_rejected() {
        assert!(matches!(
            GridSize::new(51, 3),
            Err(Error::InvalidGridSize { .. })
        ));
        assert!(matches!(
            GridSize::new(3, 51),
            Err(Error::InvalidGridSize { .. })
        ));
        assert!(matches!(
            GridSize::new(usize::MAX, usize::MAX),
            Err(Error::InvalidGridSize { .. })
        ));
    }

    #[test]
    fn when_checking_bounds_the_edges_are_inside_the_grid() {
        let grid = Grid::new(GridSize::new(5, 3).unwrap());

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(5, 3)));
        assert!(!grid.contains(Position::new(6, 3)));
        assert!(!grid.contains(Position::new(5, 4)));
    }

    #[test]
    fn when_leaving_a_scent_only_that_exact_position_is_marked() {
        let mut grid = Grid::new(GridSize::new(5, 3).unwrap());

        assert!(grid.leave_scent(Position::new(3, 3)));
        assert!(!grid.leave_scent(Position::new(3, 3)));

        assert!(grid.has_scent(Position::new(3, 3)));
        assert!(!grid.has_scent(Position::new(3, 2)));
        assert!(!grid.has_scent(Position::new(2, 3)));
        assert_eq!(grid.scents(), vec![Position::new(3, 3)]);
    }
}
