use crate::core::{CellLabel, CellRef, CourtLayout, Point, Side};

/// A single recorded landing cell within a rally.
///
/// The point and label are computed once from the cell when the shot is
/// created and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    point: Point,
    label: CellLabel,
}

impl Shot {
    #[must_use]
    pub fn new(cell: CellRef, layout: &CourtLayout) -> Self {
        Self {
            point: layout.grid().cell_center(cell),
            label: layout.label_of(cell),
        }
    }

    #[must_use]
    pub const fn point(&self) -> Point {
        self.point
    }

    #[must_use]
    pub const fn cell(&self) -> CellRef {
        self.label.cell()
    }

    #[must_use]
    pub const fn label(&self) -> CellLabel {
        self.label
    }

    #[must_use]
    pub const fn side(&self) -> Side {
        self.label.side()
    }
}

/// Arrow between two consecutive shots of a rally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    /// 1-based index of the destination shot; the first arrow is step 2.
    pub step: usize,
    /// Side credited with the stroke, used to color the arrow.
    pub striker: Side,
}

impl Segment {
    fn between(index: usize, from: &Shot, to: &Shot) -> Self {
        let striker = match (from.side(), to.side()) {
            (Side::Near, Side::Far) => Side::Near,
            (Side::Far, Side::Near) => Side::Far,
            (_, side) => side,
        };
        Self {
            from: from.point(),
            to: to.point(),
            step: index + 1,
            striker,
        }
    }
}

/// Shots of the rally currently being recorded, in temporal order.
///
/// A rally may cross sides shot by shot, and the same cell may appear any
/// number of times. An open rally may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rally {
    shots: Vec<Shot>,
}

impl Rally {
    #[must_use]
    pub const fn new() -> Self {
        Self { shots: Vec::new() }
    }

    #[must_use]
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    #[must_use]
    pub fn last_shot(&self) -> Option<&Shot> {
        self.shots.last()
    }

    /// Appends a shot landing in `cell` and returns it.
    pub fn append_shot(&mut self, cell: CellRef, layout: &CourtLayout) -> Shot {
        let shot = Shot::new(cell, layout);
        self.shots.push(shot);
        shot
    }

    /// Removes the most recent shot. Does nothing on an empty rally.
    pub fn remove_last_shot(&mut self) -> Option<Shot> {
        self.shots.pop()
    }

    pub fn clear(&mut self) {
        self.shots.clear();
    }

    /// Arrows between consecutive shots, in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.shots
            .windows(2)
            .enumerate()
            .map(|(i, pair)| Segment::between(i + 1, &pair[0], &pair[1]))
    }
}

/// A finished rally as stored in the session history.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedRally {
    shots: Vec<Shot>,
    terminal: CellLabel,
    winner: Side,
}

impl ClosedRally {
    /// Closes `rally`. Returns `None` if it has no shots.
    pub(crate) fn new(rally: &Rally, winner: Side) -> Option<Self> {
        let terminal = rally.last_shot()?.label();
        Some(Self {
            shots: rally.shots.clone(),
            terminal,
            winner,
        })
    }

    #[must_use]
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    /// Label of the last shot, which decided the point.
    #[must_use]
    pub const fn terminal(&self) -> CellLabel {
        self.terminal
    }

    #[must_use]
    pub const fn winner(&self) -> Side {
        self.winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_computes_point_and_label() {
        let layout = CourtLayout::standard();
        let mut rally = Rally::new();
        let cell = CellRef::new(Side::Far, 2, 3);

        let shot = rally.append_shot(cell, &layout);
        assert_eq!(shot.cell(), cell);
        assert_eq!(shot.side(), Side::Far);
        assert_eq!(shot.point(), layout.grid().cell_center(cell));
        assert_eq!(shot.label(), layout.label_of(cell));
        assert_eq!(rally.len(), 1);
    }

    #[test]
    fn test_repeated_cells_allowed() {
        let layout = CourtLayout::standard();
        let mut rally = Rally::new();
        let cell = CellRef::new(Side::Near, 3, 3);
        for _ in 0..3 {
            rally.append_shot(cell, &layout);
        }
        assert_eq!(rally.len(), 3);
        assert!(rally.shots().iter().all(|shot| shot.cell() == cell));
    }

    #[test]
    fn test_remove_last_shot() {
        let layout = CourtLayout::standard();
        let mut rally = Rally::new();
        assert_eq!(rally.remove_last_shot(), None);

        rally.append_shot(CellRef::new(Side::Near, 2, 2), &layout);
        rally.append_shot(CellRef::new(Side::Far, 1, 3), &layout);
        let removed = rally.remove_last_shot().unwrap();
        assert_eq!(removed.cell(), CellRef::new(Side::Far, 1, 3));
        assert_eq!(rally.len(), 1);

        rally.clear();
        assert!(rally.is_empty());
        assert_eq!(rally.remove_last_shot(), None);
    }

    #[test]
    fn test_segments_striker() {
        let layout = CourtLayout::standard();
        let mut rally = Rally::new();
        for cell in [
            CellRef::new(Side::Near, 2, 2),
            CellRef::new(Side::Far, 2, 2),
            CellRef::new(Side::Near, 3, 4),
            CellRef::new(Side::Near, 2, 4),
        ] {
            rally.append_shot(cell, &layout);
        }

        let segments = rally.segments().collect::<Vec<_>>();
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments.iter().map(|s| s.step).collect::<Vec<_>>(),
            [2, 3, 4]
        );
        assert_eq!(segments[0].striker, Side::Near);
        assert_eq!(segments[1].striker, Side::Far);
        assert_eq!(segments[2].striker, Side::Near);
        assert_eq!(segments[0].from, rally.shots()[0].point());
        assert_eq!(segments[2].to, rally.shots()[3].point());
    }

    #[test]
    fn test_segments_need_two_shots() {
        let layout = CourtLayout::standard();
        let mut rally = Rally::new();
        assert_eq!(rally.segments().count(), 0);
        rally.append_shot(CellRef::new(Side::Near, 2, 2), &layout);
        assert_eq!(rally.segments().count(), 0);
    }

    #[test]
    fn test_closed_rally() {
        let layout = CourtLayout::standard();
        let mut rally = Rally::new();
        assert_eq!(ClosedRally::new(&rally, Side::Near), None);

        rally.append_shot(CellRef::new(Side::Near, 2, 2), &layout);
        rally.append_shot(CellRef::new(Side::Far, 4, 4), &layout);
        let closed = ClosedRally::new(&rally, Side::Far).unwrap();
        assert_eq!(closed.shots(), rally.shots());
        assert_eq!(closed.terminal(), layout.label(Side::Far, 4, 4));
        assert_eq!(closed.winner(), Side::Far);

        rally.clear();
        assert_eq!(closed.shots().len(), 2);
    }
}
