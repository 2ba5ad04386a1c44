//! Fixed-size row-major grid storage
//!
//! Both the zone's published grids and the maze generator's working grid use
//! this type, so they share one addressing scheme.

use serde::{Deserialize, Serialize};

use crate::error::ZoneError;

/// Grid coordinate, row-major by `y`
///
/// Signed so that probes past the top/left edge are representable; such
/// probes simply miss the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by `(dx, dy)`, saturating at the `i32` range
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Coordinate shifted by `(dx, dy)`, or `None` past the `i32` range
    pub const fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Cell halfway between two lattice rooms
    pub const fn midpoint(self, other: Coord) -> Self {
        Self {
            x: (self.x + other.x) / 2,
            y: (self.y + other.y) / 2,
        }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Width x height cells of `T`, stored row by row
///
/// Deserializing checks that the cell count matches the dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "GridData<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// Unchecked serialized form of a [`Grid`]
#[derive(Deserialize)]
struct GridData<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<GridData<T>> for Grid<T> {
    type Error = ZoneError;

    fn try_from(data: GridData<T>) -> Result<Self, Self::Error> {
        if data.width.checked_mul(data.height) != Some(data.cells.len()) {
            return Err(ZoneError::CellCount {
                width: data.width,
                height: data.height,
                cells: data.cells.len(),
            });
        }
        Ok(Self {
            width: data.width,
            height: data.height,
            cells: data.cells,
        })
    }
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` addresses a cell of this grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Cell value, or `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Write a cell. Returns false (and writes nothing) when out of bounds.
    pub fn set(&mut self, x: i32, y: i32, value: T) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Overwrite every cell
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Every cell with its coordinate, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Coord, T)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(idx, &value)| {
            (Coord::new((idx % width) as i32, (idx / width) as i32), value)
        })
    }

    /// Apply `f` to every cell in place
    pub fn map_in_place(&mut self, mut f: impl FnMut(T) -> T) {
        for cell in &mut self.cells {
            *cell = f(*cell);
        }
    }

    /// Number of cells matching `pred`
    pub fn count(&self, pred: impl Fn(T) -> bool) -> usize {
        self.cells.iter().filter(|&&value| pred(value)).count()
    }

    /// In-bounds coordinates of the 8-neighbourhood of `(x, y)`, excluding
    /// `(x, y)` itself, column by column.
    pub fn neighbors(&self, x: i32, y: i32) -> Vec<Coord> {
        let center = Coord::new(x, y);
        let mut out = Vec::with_capacity(8);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(c) = center.checked_offset(dx, dy)
                    && self.in_bounds(c.x, c.y)
                {
                    out.push(c);
                }
            }
        }
        out
    }
}
