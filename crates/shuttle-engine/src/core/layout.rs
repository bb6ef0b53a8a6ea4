use std::{collections::BTreeSet, fmt};

use crate::{
    ConfigError,
    core::geometry::{CellRef, GridConfig, Side},
};

/// A `(row, col)` pair within one half of the court.
pub type CellPos = (u8, u8);

/// Boundary cells of the default 4x5 near half: its back line and both
/// side columns.
pub const DEFAULT_NEAR_OUT_CELLS: &[CellPos] = &[
    (1, 1),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 1),
    (3, 1),
    (4, 1),
    (2, 5),
    (3, 5),
    (4, 5),
];

/// Boundary cells of the default 4x5 far half: both side columns and its back
/// line (row 4, the row farthest from the net).
pub const DEFAULT_FAR_OUT_CELLS: &[CellPos] = &[
    (1, 1),
    (1, 5),
    (2, 1),
    (2, 5),
    (3, 1),
    (3, 5),
    (4, 1),
    (4, 2),
    (4, 3),
    (4, 4),
    (4, 5),
];

/// Classification label of a cell.
///
/// A label is a pure function of its [`CellRef`] and the out-cell sets of the
/// [`CourtLayout`] that produced it. Equality, ordering and hashing are
/// positional, so display name swaps between games never change a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellLabel {
    cell: CellRef,
    is_out: bool,
}

impl CellLabel {
    #[must_use]
    pub const fn cell(&self) -> CellRef {
        self.cell
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        self.cell.side()
    }

    #[must_use]
    pub const fn is_out(&self) -> bool {
        self.is_out
    }

    /// Compact form for cell buttons, e.g. `oN1,1` or `F2,3`.
    #[must_use]
    pub fn short(&self) -> String {
        let prefix = if self.is_out { "o" } else { "" };
        format!(
            "{prefix}{}{},{}",
            self.cell.side().tag(),
            self.cell.row(),
            self.cell.col()
        )
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_out {
            f.write_str("out-")?;
        }
        write!(f, "{}", self.cell)
    }
}

/// Static partition of each half into out cells and in-play cells.
///
/// The near and far out-cell sets are configured independently. Real courts
/// are not symmetric around the net from the point of view of a fixed grid:
/// the near back line is row 1 while the far back line is the last row.
#[derive(Debug, Clone, PartialEq)]
pub struct CourtLayout {
    grid: GridConfig,
    near_out: BTreeSet<CellPos>,
    far_out: BTreeSet<CellPos>,
}

impl CourtLayout {
    /// Builds a layout, rejecting out-cells outside `grid`.
    pub fn new<N, F>(grid: GridConfig, near_out: N, far_out: F) -> Result<Self, ConfigError>
    where
        N: IntoIterator<Item = CellPos>,
        F: IntoIterator<Item = CellPos>,
    {
        grid.validate()?;
        let near_out = collect_out_cells(&grid, Side::Near, near_out)?;
        let far_out = collect_out_cells(&grid, Side::Far, far_out)?;
        Ok(Self {
            grid,
            near_out,
            far_out,
        })
    }

    /// The default 4x5 badminton layout.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            grid: GridConfig::STANDARD,
            near_out: DEFAULT_NEAR_OUT_CELLS.iter().copied().collect(),
            far_out: DEFAULT_FAR_OUT_CELLS.iter().copied().collect(),
        }
    }

    #[must_use]
    pub const fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn out_cells(&self, side: Side) -> impl Iterator<Item = CellPos> + '_ {
        self.out_set(side).iter().copied()
    }

    #[must_use]
    pub fn is_out_cell(&self, side: Side, row: u8, col: u8) -> bool {
        self.out_set(side).contains(&(row, col))
    }

    #[must_use]
    pub fn label(&self, side: Side, row: u8, col: u8) -> CellLabel {
        CellLabel {
            cell: CellRef::new(side, row, col),
            is_out: self.is_out_cell(side, row, col),
        }
    }

    #[must_use]
    pub fn label_of(&self, cell: CellRef) -> CellLabel {
        self.label(cell.side(), cell.row(), cell.col())
    }

    fn out_set(&self, side: Side) -> &BTreeSet<CellPos> {
        match side {
            Side::Near => &self.near_out,
            Side::Far => &self.far_out,
        }
    }
}

fn collect_out_cells<I>(
    grid: &GridConfig,
    side: Side,
    cells: I,
) -> Result<BTreeSet<CellPos>, ConfigError>
where
    I: IntoIterator<Item = CellPos>,
{
    cells
        .into_iter()
        .map(|(row, col)| {
            if grid.contains(CellRef::new(side, row, col)) {
                Ok((row, col))
            } else {
                Err(ConfigError::OutCellOutOfRange {
                    side,
                    row,
                    col,
                    rows: grid.rows(),
                    cols: grid.cols(),
                })
            }
        })
        .collect()
}
