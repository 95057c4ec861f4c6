//! The three 12x12 demonstration mazes, used as fixtures by the tests and benchmarks.
use crate::error::GridError;
use crate::grid::{Coord, Grid};

/// A named maze with its start and goal cells.
#[derive(Clone, Copy, Debug)]
pub struct MazeConfig {
    pub name: &'static str,
    pub rows: &'static [[u8; 12]; 12],
    pub start: Coord,
    pub goal: Coord,
}

impl MazeConfig {
    pub fn grid(&self) -> Result<Grid, GridError> {
        Grid::from_rows(&self.rows[..])
    }
}

const MAZE_1: [[u8; 12]; 12] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const MAZE_2: [[u8; 12]; 12] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const MAZE_3: [[u8; 12]; 12] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

pub fn sample_mazes() -> Vec<MazeConfig> {
    vec![
        MazeConfig {
            name: "1",
            rows: &MAZE_1,
            start: Coord::new(1, 1),
            goal: Coord::new(9, 10),
        },
        MazeConfig {
            name: "2",
            rows: &MAZE_2,
            start: Coord::new(1, 1),
            goal: Coord::new(9, 1),
        },
        MazeConfig {
            name: "3",
            rows: &MAZE_3,
            start: Coord::new(1, 1),
            goal: Coord::new(9, 10),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_open() {
        for maze in sample_mazes() {
            let grid = maze.grid().unwrap();
            assert_eq!(grid.rows(), 12);
            assert!(grid.is_traversable(maze.start), "maze {}", maze.name);
            assert!(grid.is_traversable(maze.goal), "maze {}", maze.name);
        }
    }
}
