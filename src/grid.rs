use crate::error::GridError;
use crate::{Cost, OPEN, WALL};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid as _};
use grid_util::point::Point;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize, Serializer};

/// A cell position as `(row, col)`, rows counted top to bottom. Maps onto a [Point] with
/// `x = col` and `y = row`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Largest row or column that converts to a [Point]. Any two such points have a Manhattan
    /// distance that fits an [i32].
    pub const MAX_COMPONENT: usize = (i32::MAX / 2) as usize;

    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// [None] if a component exceeds [Coord::MAX_COMPONENT].
    pub fn to_point(self) -> Option<Point> {
        if self.row > Coord::MAX_COMPONENT || self.col > Coord::MAX_COMPONENT {
            return None;
        }
        Some(Point::new(
            i32::try_from(self.col).ok()?,
            i32::try_from(self.row).ok()?,
        ))
    }

    /// [None] for points left of or above the origin.
    pub fn from_point(point: Point) -> Option<Coord> {
        Some(Coord::new(
            usize::try_from(point.y).ok()?,
            usize::try_from(point.x).ok()?,
        ))
    }

    /// Number of unit moves between the two cells, see [Point::manhattan_distance].
    pub fn manhattan_distance(&self, other: &Coord) -> Option<Cost> {
        let (a, b) = (self.to_point()?, other.to_point()?);
        Some(a.manhattan_distance(&b).unsigned_abs())
    }

    /// True if the two coordinates differ by exactly one step along one axis.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == Some(1)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular obstacle grid backed by a [BoolGrid] in which `true` marks a blocked cell.
/// A [Grid] is validated on construction and cannot be modified afterwards.
///
/// Dimensions are bounded so every coordinate converts to a [Point] and every path cost plus
/// heuristic estimate fits a [Cost].
#[derive(Clone, Debug)]
pub struct Grid {
    cells: BoolGrid,
}

/// Rejects dimensions whose coordinates or costs would overflow.
fn check_dimensions(rows: usize, cols: usize) -> Result<(), GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::Empty);
    }
    let fits_point = rows <= Coord::MAX_COMPONENT + 1 && cols <= Coord::MAX_COMPONENT + 1;
    // Longest path (every cell) plus the largest Manhattan estimate
    let worst_cost = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_add(rows))
        .and_then(|n| n.checked_add(cols))
        .and_then(|n| Cost::try_from(n).ok());
    if !fits_point || worst_cost.is_none() {
        return Err(GridError::TooLarge { rows, cols });
    }
    Ok(())
}

impl Grid {
    /// Creates a grid where every cell is `blocked`.
    pub fn new(rows: usize, cols: usize, blocked: bool) -> Result<Grid, GridError> {
        check_dimensions(rows, cols)?;
        Ok(Grid {
            cells: BoolGrid::new(cols, rows, blocked),
        })
    }

    /// Builds a grid from rows of [OPEN] (`0`) and [WALL] (`1`) markers.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Grid, GridError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        check_dimensions(rows.len(), cols)?;
        let mut cells = BoolGrid::new(cols, rows.len(), false);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            for (col, &marker) in values.iter().enumerate() {
                let blocked = match marker {
                    OPEN => false,
                    WALL => true,
                    other => {
                        return Err(GridError::InvalidMarker {
                            row,
                            col,
                            marker: other,
                        })
                    }
                };
                cells.set(col, row, blocked);
            }
        }
        Ok(Grid { cells })
    }

    pub fn rows(&self) -> usize {
        self.cells.height()
    }

    pub fn cols(&self) -> usize {
        self.cells.width()
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows() && coord.col < self.cols()
    }

    /// Whether the cell is blocked, or [None] outside the grid.
    pub fn get(&self, coord: Coord) -> Option<bool> {
        self.in_bounds(coord)
            .then(|| self.cells.get(coord.col, coord.row))
    }

    pub fn is_traversable(&self, coord: Coord) -> bool {
        self.get(coord) == Some(false)
    }

    /// Traversable cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows())
            .flat_map(move |row| (0..self.cols()).map(move |col| Coord::new(row, col)))
            .filter(|c| self.is_traversable(*c))
    }

    /// The in-bounds traversable cells of the von Neumann neighbourhood of `coord`.
    pub fn open_neighbours(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        coord
            .to_point()
            .into_iter()
            .flat_map(|p| p.neumann_neighborhood())
            .filter_map(Coord::from_point)
            .filter(|c| self.is_traversable(*c))
    }

    /// The grid as rows of [OPEN] and [WALL] markers.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|row| {
                (0..self.cols())
                    .map(|col| if self.cells.get(col, row) { WALL } else { OPEN })
                    .collect()
            })
            .collect()
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.to_rows() == other.to_rows()
    }
}

impl Eq for Grid {}

/// Serialized as its rows of markers. There is no `Deserialize`: go through
/// [Grid::from_rows] so the rows are validated.
#[cfg(feature = "serde")]
impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

/// Parses one row per line. `0` or `.` is open, `1` or `#` is a wall; blank lines and
/// surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = rows.len();
            let values = line
                .chars()
                .enumerate()
                .map(|(col, ch)| match ch {
                    '0' | '.' => Ok(OPEN),
                    '1' | '#' => Ok(WALL),
                    ch => Err(GridError::InvalidChar { row, col, ch }),
                })
                .collect::<Result<Vec<u8>, _>>()?;
            rows.push(values);
        }
        Grid::from_rows(&rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let line = (0..self.cols())
                .map(|col| if self.cells.get(col, row) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
