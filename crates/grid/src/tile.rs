use serde::{Deserialize, Serialize};

/// Occupancy of a single grid cell.
///
/// Kept as an enum rather than a bool so typed wall materials can slot in
/// later without touching callers that only ask `is_solid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Wall,
}

impl Cell {
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, Cell::Wall)
    }
}

/// Errors from grid construction.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("cell count {got} does not match {width}x{height}")]
    CellCountMismatch {
        width: usize,
        height: usize,
        got: usize,
    },
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("unknown map glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}

/// Rectangular wall/empty grid defining a level's static geometry.
///
/// One world unit equals one cell. Created once per level load and treated
/// as immutable until the next level replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// Build a grid from row-major cells.
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        if cells.len() != width * height {
            return Err(GridError::CellCountMismatch {
                width,
                height,
                got: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse a text map: `#` is a wall, `.` and space are empty.
    ///
    /// All rows must have equal length.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let got = line.chars().count();
            if got != width {
                return Err(GridError::RaggedRows {
                    row,
                    expected: width,
                    got,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                cells.push(match glyph {
                    '#' => Cell::Wall,
                    '.' | ' ' => Cell::Empty,
                    other => {
                        return Err(GridError::UnknownGlyph {
                            glyph: other,
                            row,
                            col,
                        });
                    }
                });
            }
        }
        Self::new(width, height, cells)
    }

    /// An empty interior surrounded by a one-cell wall perimeter.
    pub fn walled(width: usize, height: usize) -> Result<Self, GridError> {
        if width < 3 || height < 3 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let edge = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                cells.push(if edge { Cell::Wall } else { Cell::Empty });
            }
        }
        Self::new(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at integer indices; anything out of bounds is a wall.
    pub fn cell(&self, x: i64, y: i64) -> Cell {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Cell::Wall;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    /// Cell containing a world-space point (coordinates floored).
    pub fn cell_at(&self, x: f32, y: f32) -> Cell {
        self.cell(x.floor() as i64, y.floor() as i64)
    }

    /// Whether the cell containing a world-space point is solid or outside.
    #[inline]
    pub fn is_solid_at(&self, x: f32, y: f32) -> bool {
        self.cell_at(x, y).is_solid()
    }
}
