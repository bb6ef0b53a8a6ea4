use std::collections::BTreeMap;

use crate::{
    core::{CellRef, GridConfig, Side},
    engine::rally::ClosedRally,
};

/// Landing-cell frequencies over a rally history.
///
/// Only the terminal shot of each closed rally is counted; intermediate
/// shots feed the trajectory display, not the statistics. Counts are kept
/// per side, and a cell's percentage is relative to its own side's total.
///
/// # Example
///
/// ```
/// use shuttle_engine::{CellRef, CourtConfig, RallySession, Side};
///
/// let mut session = RallySession::new(&CourtConfig::default()).unwrap();
/// for (side, row, col) in [(Side::Near, 1, 1), (Side::Near, 1, 1), (Side::Far, 2, 2)] {
///     session.add_point(side, row, col);
///     session.end_rally();
/// }
///
/// let stats = session.landing_stats();
/// assert_eq!(stats.percentage(CellRef::new(Side::Near, 1, 1)), 100.0);
/// assert_eq!(stats.percentage(CellRef::new(Side::Far, 2, 2)), 100.0);
/// assert_eq!(stats.percentage(CellRef::new(Side::Far, 1, 1)), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LandingStats {
    grid: GridConfig,
    counts: BTreeMap<CellRef, usize>,
    near_total: usize,
    far_total: usize,
}

impl LandingStats {
    pub fn from_history<'a, I>(history: I, grid: &GridConfig) -> Self
    where
        I: IntoIterator<Item = &'a ClosedRally>,
    {
        let mut counts = BTreeMap::new();
        let mut near_total = 0;
        let mut far_total = 0;
        for rally in history {
            let cell = rally.terminal().cell();
            *counts.entry(cell).or_insert(0) += 1;
            match cell.side() {
                Side::Near => near_total += 1,
                Side::Far => far_total += 1,
            }
        }
        Self {
            grid: *grid,
            counts,
            near_total,
            far_total,
        }
    }

    /// Number of rallies that ended in `cell`.
    #[must_use]
    pub fn count(&self, cell: CellRef) -> usize {
        self.counts.get(&cell).copied().unwrap_or(0)
    }

    /// Number of rallies that ended anywhere on `side`.
    #[must_use]
    pub const fn total(&self, side: Side) -> usize {
        match side {
            Side::Near => self.near_total,
            Side::Far => self.far_total,
        }
    }

    /// Share of `cell` among its side's landings, from 0 to 100.
    ///
    /// Returns 0 when the side has no landings yet.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn percentage(&self, cell: CellRef) -> f64 {
        let total = self.total(cell.side());
        if total == 0 {
            return 0.0;
        }
        self.count(cell) as f64 / total as f64 * 100.0
    }

    /// Every cell of the grid with its percentage, zero cells included.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, f64)> + '_ {
        self.grid
            .cells()
            .map(move |cell| (cell, self.percentage(cell)))
    }

    #[must_use]
    pub fn percentages(&self) -> BTreeMap<CellRef, f64> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CourtLayout, Rally};

    fn closed(layout: &CourtLayout, cells: &[CellRef]) -> ClosedRally {
        let mut rally = Rally::new();
        for &cell in cells {
            rally.append_shot(cell, layout);
        }
        ClosedRally::new(&rally, Side::Near).unwrap()
    }

    #[test]
    fn test_empty_history_reports_zero_everywhere() {
        let layout = CourtLayout::standard();
        let history: Vec<ClosedRally> = vec![];
        let stats = LandingStats::from_history(&history, layout.grid());
        assert_eq!(stats.total(Side::Near), 0);
        assert_eq!(stats.total(Side::Far), 0);
        assert_eq!(stats.iter().count(), 40);
        assert!(stats.iter().all(|(_, pct)| pct == 0.0));
    }

    #[test]
    fn test_only_terminal_shot_counts() {
        let layout = CourtLayout::standard();
        let history = [closed(
            &layout,
            &[
                CellRef::new(Side::Near, 2, 2),
                CellRef::new(Side::Far, 3, 3),
                CellRef::new(Side::Near, 4, 4),
            ],
        )];
        let stats = LandingStats::from_history(&history, layout.grid());
        assert_eq!(stats.count(CellRef::new(Side::Near, 4, 4)), 1);
        assert_eq!(stats.count(CellRef::new(Side::Near, 2, 2)), 0);
        assert_eq!(stats.count(CellRef::new(Side::Far, 3, 3)), 0);
        assert_eq!(stats.total(Side::Near), 1);
        assert_eq!(stats.total(Side::Far), 0);
    }

    #[test]
    fn test_landing_percentages_by_side() {
        let layout = CourtLayout::standard();
        let near = CellRef::new(Side::Near, 1, 1);
        let far = CellRef::new(Side::Far, 2, 2);
        let history = [
            closed(&layout, &[near]),
            closed(&layout, &[near]),
            closed(&layout, &[far]),
        ];
        let stats = LandingStats::from_history(&history, layout.grid());
        assert_eq!(stats.count(near), 2);
        assert_eq!(stats.total(Side::Near), 2);
        assert_eq!(stats.percentage(near), 100.0);
        assert_eq!(stats.percentage(far), 100.0);
    }

    #[test]
    fn test_percentages_sum_to_100_per_side() {
        let layout = CourtLayout::standard();
        let history = [
            closed(&layout, &[CellRef::new(Side::Near, 1, 1)]),
            closed(&layout, &[CellRef::new(Side::Near, 2, 3)]),
            closed(&layout, &[CellRef::new(Side::Near, 2, 3)]),
            closed(&layout, &[CellRef::new(Side::Far, 4, 5)]),
            closed(&layout, &[CellRef::new(Side::Far, 1, 2)]),
            closed(&layout, &[CellRef::new(Side::Far, 3, 3)]),
        ];
        let stats = LandingStats::from_history(&history, layout.grid());
        for side in Side::ALL {
            let sum = stats
                .iter()
                .filter(|(cell, _)| cell.side() == side)
                .map(|(_, pct)| pct)
                .sum::<f64>();
            assert!((sum - 100.0).abs() < 1e-9, "{side} sums to {sum}");
        }
        let map = stats.percentages();
        assert_eq!(map.len(), 40);
        assert!((map[&CellRef::new(Side::Near, 2, 3)] - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_side_without_landings() {
        let layout = CourtLayout::standard();
        let history = [closed(&layout, &[CellRef::new(Side::Far, 2, 2)])];
        let stats = LandingStats::from_history(&history, layout.grid());
        assert!(
            stats
                .iter()
                .filter(|(cell, _)| cell.side() == Side::Near)
                .all(|(_, pct)| pct == 0.0)
        );
    }
}
