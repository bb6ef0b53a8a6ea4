use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    core::{CellLabel, CellRef, CourtLayout, Side},
};

/// 1-based number of the game in progress.
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
#[serde(transparent)]
pub struct GameNumber(u32);

impl Default for GameNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl GameNumber {
    pub const FIRST: Self = Self(1);

    /// Returns `None` for zero.
    #[must_use]
    pub const fn new(number: u32) -> Option<Self> {
        if number == 0 { None } else { Some(Self(number)) }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[must_use]
    pub const fn is_odd(self) -> bool {
        self.0 % 2 == 1
    }
}

/// Decides which side wins a point from the cell that ended the rally.
///
/// The rule holds one set of cells, the near-scoring cells: a rally ending on
/// one of them means the near side won the point in odd-numbered games. The
/// conventional set mixes two cases:
///
/// - **Near out-cells**: the far side hit the shuttle out
/// - **Far in-play cells**: the near side's shot landed in and was not
///   returned
///
/// Players change ends between games, so in even-numbered games the same set
/// awards the point to the far side instead. The set itself never changes.
///
/// # Example
///
/// ```
/// use shuttle_engine::{CourtLayout, GameNumber, ScoringRule, Side};
///
/// let layout = CourtLayout::standard();
/// let rule = ScoringRule::standard(&layout);
/// let label = layout.label(Side::Far, 2, 3);
///
/// assert_eq!(rule.award_point(&label, GameNumber::FIRST), Side::Near);
/// assert_eq!(rule.award_point(&label, GameNumber::FIRST.next()), Side::Far);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRule {
    near_scoring: BTreeSet<CellRef>,
}

impl ScoringRule {
    /// Builds a rule from an explicit set of near-scoring cells.
    pub fn new<I>(layout: &CourtLayout, near_scoring: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = CellRef>,
    {
        let grid = layout.grid();
        let near_scoring = near_scoring
            .into_iter()
            .map(|cell| {
                if grid.contains(cell) {
                    Ok(cell)
                } else {
                    Err(ConfigError::ScoringCellOutOfRange {
                        cell,
                        rows: grid.rows(),
                        cols: grid.cols(),
                    })
                }
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { near_scoring })
    }

    /// Near out-cells plus far in-play cells of `layout`.
    #[must_use]
    pub fn standard(layout: &CourtLayout) -> Self {
        let near_scoring = layout
            .grid()
            .cells()
            .filter(|cell| {
                let is_out = layout.is_out_cell(cell.side(), cell.row(), cell.col());
                match cell.side() {
                    Side::Near => is_out,
                    Side::Far => !is_out,
                }
            })
            .collect();
        Self { near_scoring }
    }

    pub fn near_scoring_cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        self.near_scoring.iter().copied()
    }

    #[must_use]
    pub fn is_near_scoring(&self, label: &CellLabel) -> bool {
        self.near_scoring.contains(&label.cell())
    }

    /// Returns the side awarded the point when a rally ends on `terminal`.
    #[must_use]
    pub fn award_point(&self, terminal: &CellLabel, game: GameNumber) -> Side {
        let near_scores = self.is_near_scoring(terminal);
        match (game.is_odd(), near_scores) {
            (true, true) | (false, false) => Side::Near,
            (true, false) | (false, true) => Side::Far,
        }
    }
}
