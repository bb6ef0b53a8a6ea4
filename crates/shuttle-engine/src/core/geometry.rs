use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One of the two fixed halves of the court.
///
/// The identity of a side never changes during a session. Only the display
/// name and color attached to it swap between games (see
/// [`SideDisplay`](crate::SideDisplay)).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The half drawn first (top of the court, `y` below the midline).
    #[display("near")]
    Near,
    /// The half drawn second (bottom of the court, `y` at or past the midline).
    #[display("far")]
    Far,
}

impl Side {
    pub const ALL: [Self; 2] = [Self::Near, Self::Far];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Near => Self::Far,
            Self::Far => Self::Near,
        }
    }

    /// Single-letter tag used in compact labels.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Near => 'N',
            Self::Far => 'F',
        }
    }
}

/// A position in the logical court coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between two points, used to place step numbers on arrows.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Reference to one grid cell on one side of the court.
///
/// Rows and columns are 1-based. A `CellRef` is only meaningful together with
/// the [`GridConfig`] it was created for; use [`GridConfig::contains`] to
/// check it and [`GridConfig::clamp`] to force it into range.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{side}({row},{col})")]
pub struct CellRef {
    side: Side,
    row: u8,
    col: u8,
}

impl CellRef {
    #[must_use]
    pub const fn new(side: Side, row: u8, col: u8) -> Self {
        Self { side, row, col }
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub const fn row(&self) -> u8 {
        self.row
    }

    #[must_use]
    pub const fn col(&self) -> u8 {
        self.col
    }
}

/// Dimensions of the per-side grid and of one cell in logical units.
///
/// # Coordinate System
///
/// - `x` grows with the column, `y` grows with the row
/// - The near half covers `y` in `[0, midline)`, the far half covers
///   `[midline, 2 * midline)` where `midline = rows * cell_height`
/// - Row 1 of the near half is its back line; row 1 of the far half sits
///   against the net
///
/// ```text
///  y=0        +---+---+---+---+---+
///             | N1,1          N1,5|   near half
///             |        ...        |
///  midline    +===================+   net
///             | F1,1          F1,5|   far half
///             |        ...        |
///  2*midline  +---+---+---+---+---+
/// ```
///
/// # Example
///
/// ```
/// use shuttle_engine::{CellRef, GridConfig, Side};
///
/// let grid = GridConfig::new(4, 5).unwrap();
/// let cell = CellRef::new(Side::Far, 2, 3);
/// assert_eq!(grid.nearest_cell(grid.cell_center(cell)), cell);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    rows: u8,
    cols: u8,
    #[serde(default = "default_cell_size")]
    cell_width: f64,
    #[serde(default = "default_cell_size")]
    cell_height: f64,
}

const fn default_cell_size() -> f64 {
    GridConfig::DEFAULT_CELL_SIZE
}

impl GridConfig {
    pub const DEFAULT_CELL_SIZE: f64 = 1.0;

    /// The 4x5 grid of unit cells used by the default court.
    pub const STANDARD: Self = Self {
        rows: 4,
        cols: 5,
        cell_width: Self::DEFAULT_CELL_SIZE,
        cell_height: Self::DEFAULT_CELL_SIZE,
    };

    /// Creates a grid with unit-sized cells.
    pub fn new(rows: u8, cols: u8) -> Result<Self, ConfigError> {
        Self::with_cell_size(rows, cols, Self::DEFAULT_CELL_SIZE, Self::DEFAULT_CELL_SIZE)
    }

    pub fn with_cell_size(
        rows: u8,
        cols: u8,
        cell_width: f64,
        cell_height: f64,
    ) -> Result<Self, ConfigError> {
        let grid = Self {
            rows,
            cols,
            cell_width,
            cell_height,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Checks the invariants that make [`cell_center`](Self::cell_center) and
    /// [`nearest_cell`](Self::nearest_cell) total.
    ///
    /// Deserialized grids skip the constructor, so callers loading a grid
    /// from a file must call this before use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let valid_size = |size: f64| size.is_finite() && size > 0.0;
        if !valid_size(self.cell_width) || !valid_size(self.cell_height) {
            return Err(ConfigError::InvalidCellSize {
                width: self.cell_width,
                height: self.cell_height,
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> u8 {
        self.cols
    }

    #[must_use]
    pub const fn cell_width(&self) -> f64 {
        self.cell_width
    }

    #[must_use]
    pub const fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// The `y` coordinate separating the near half from the far half.
    #[must_use]
    pub fn midline(&self) -> f64 {
        f64::from(self.rows) * self.cell_height
    }

    /// Width and height of the whole court (both halves) in logical units.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        (f64::from(self.cols) * self.cell_width, 2.0 * self.midline())
    }

    #[must_use]
    pub fn contains(&self, cell: CellRef) -> bool {
        (1..=self.rows).contains(&cell.row) && (1..=self.cols).contains(&cell.col)
    }

    /// Forces a row/column pair into `[1, rows]` x `[1, cols]`.
    #[must_use]
    pub fn clamp(&self, side: Side, row: u8, col: u8) -> CellRef {
        CellRef::new(
            side,
            row.clamp(1, self.rows.max(1)),
            col.clamp(1, self.cols.max(1)),
        )
    }

    /// Iterates every cell of both halves, near side first, row-major.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + use<> {
        let (rows, cols) = (self.rows, self.cols);
        Side::ALL.into_iter().flat_map(move |side| {
            (1..=rows).flat_map(move |row| (1..=cols).map(move |col| CellRef::new(side, row, col)))
        })
    }

    /// Center of `cell` in logical coordinates.
    #[must_use]
    pub fn cell_center(&self, cell: CellRef) -> Point {
        let origin_y = match cell.side {
            Side::Near => 0.0,
            Side::Far => self.midline(),
        };
        let x = (f64::from(cell.col) - 0.5) * self.cell_width;
        let y = origin_y + (f64::from(cell.row) - 0.5) * self.cell_height;
        Point::new(x, y)
    }

    /// Snaps an arbitrary point to the cell containing it.
    ///
    /// Points below the midline belong to the near half, points on or past it
    /// to the far half. Offsets outside the grid clamp to the closest row or
    /// column, so every point resolves to some valid cell.
    #[must_use]
    pub fn nearest_cell(&self, point: Point) -> CellRef {
        let midline = self.midline();
        let (side, local_y) = if point.y < midline {
            (Side::Near, point.y)
        } else {
            (Side::Far, point.y - midline)
        };
        let row = clamp_index(local_y / self.cell_height, self.rows);
        let col = clamp_index(point.x / self.cell_width, self.cols);
        CellRef::new(side, row, col)
    }
}

/// Converts a fractional cell offset into a 1-based index within `[1, count]`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_index(offset: f64, count: u8) -> u8 {
    let max = f64::from(count.saturating_sub(1));
    let index = offset.floor().clamp(0.0, max);
    if index.is_nan() {
        return 1;
    }
    index as u8 + 1
}
