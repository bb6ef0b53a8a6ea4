use ratatui::{
    layout::{Position, Rect},
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Context, Line as CanvasLine},
};
use shuttle_engine::{CellRef, CourtLayout, GridConfig, Point};

use crate::view::widgets::{color, style};

/// Maps logical court coordinates onto a terminal area.
///
/// The near back line is drawn at the top and the far back line at the
/// bottom, matching logical `y`. Canvas `y` grows upward, so points are
/// flipped on the way in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtViewport {
    area: Rect,
    width: f64,
    height: f64,
}

impl CourtViewport {
    pub fn new(area: Rect, grid: &GridConfig) -> Self {
        let (width, height) = grid.extent();
        Self {
            area,
            width,
            height,
        }
    }

    pub fn to_canvas(&self, point: Point) -> (f64, f64) {
        (point.x, self.height - point.y)
    }

    /// Logical point under the terminal cell at `(column, row)`.
    ///
    /// Returns `None` outside the court area. The result is the center of
    /// the terminal cell, using the same scale the canvas draws with.
    pub fn point_at(&self, column: u16, row: u16) -> Option<Point> {
        if !self.area.contains(Position::new(column, row)) {
            return None;
        }
        let x = axis_position(column - self.area.x, self.area.width, self.width);
        let y = axis_position(row - self.area.y, self.area.height, self.height);
        Some(Point::new(x, y))
    }

    /// Logical width of one terminal column.
    pub fn column_width(&self) -> f64 {
        axis_step(self.area.width, self.width)
    }

    /// Logical height of one terminal row.
    pub fn row_height(&self) -> f64 {
        axis_step(self.area.height, self.height)
    }

    /// Canvas position that centers `text_len` columns of text on `point`.
    #[expect(clippy::cast_precision_loss)]
    pub fn text_origin(&self, point: Point, text_len: usize) -> (f64, f64) {
        let (x, y) = self.to_canvas(point);
        let shift = (text_len / 2) as f64 * self.column_width();
        ((x - shift).max(0.0), y)
    }

    /// Whether `text_len` columns fit inside one court cell of `grid`.
    #[expect(clippy::cast_precision_loss)]
    pub fn fits_in_cell(&self, grid: &GridConfig, text_len: usize) -> bool {
        text_len as f64 * self.column_width() < grid.cell_width()
    }

    pub fn canvas<F>(&self, painter: F) -> Canvas<'static, F>
    where
        F: Fn(&mut Context),
    {
        Canvas::default()
            .marker(Marker::Braille)
            .background_color(color::COURT)
            .x_bounds([0.0, self.width])
            .y_bounds([0.0, self.height])
            .paint(painter)
    }
}

fn axis_step(cells: u16, extent: f64) -> f64 {
    if cells <= 1 {
        extent
    } else {
        extent / f64::from(cells - 1)
    }
}

fn axis_position(offset: u16, cells: u16, extent: f64) -> f64 {
    if cells <= 1 {
        return extent / 2.0;
    }
    ((f64::from(offset) + 0.5) * axis_step(cells, extent)).min(extent)
}

/// Draws the cell grid of both halves with the net across the middle.
pub fn paint_court(ctx: &mut Context, viewport: &CourtViewport, grid: &GridConfig) {
    let (width, height) = grid.extent();
    for col in 0..=grid.cols() {
        let x = f64::from(col) * grid.cell_width();
        ctx.draw(&CanvasLine::new(x, 0.0, x, height, color::COURT_LINE));
    }
    for row in 0..=u16::from(grid.rows()) * 2 {
        let y = f64::from(row) * grid.cell_height();
        ctx.draw(&CanvasLine::new(0.0, y, width, y, color::COURT_LINE));
    }
    let (_, net_y) = viewport.to_canvas(Point::new(0.0, grid.midline()));
    ctx.draw(&CanvasLine::new(0.0, net_y, width, net_y, color::NET));
}

/// Prints `text` centered on `cell` with `style`.
pub fn print_in_cell(
    ctx: &mut Context,
    viewport: &CourtViewport,
    grid: &GridConfig,
    cell: CellRef,
    text: String,
    style: Style,
) {
    let (x, y) = viewport.text_origin(grid.cell_center(cell), text.chars().count());
    ctx.print(x, y, Span::styled(text, style));
}

/// Prints the short label of every cell that has room for it.
pub fn print_cell_labels(ctx: &mut Context, viewport: &CourtViewport, layout: &CourtLayout) {
    let grid = layout.grid();
    for cell in grid.cells() {
        let label = layout.label_of(cell);
        let text = label.short();
        if !viewport.fits_in_cell(grid, text.len()) {
            continue;
        }
        let style = if label.is_out() {
            style::OUT_LABEL
        } else {
            style::CELL_LABEL
        };
        print_in_cell(ctx, viewport, grid, cell, text, style);
    }
}

#[cfg(test)]
mod tests {
    use shuttle_engine::Side;

    use super::*;

    fn viewport() -> (CourtViewport, GridConfig) {
        let grid = GridConfig::STANDARD;
        (CourtViewport::new(Rect::new(10, 5, 41, 17), &grid), grid)
    }

    #[test]
    fn test_point_at_maps_corners() {
        let (viewport, grid) = viewport();

        let top_left = viewport.point_at(10, 5).unwrap();
        assert_eq!(grid.nearest_cell(top_left), CellRef::new(Side::Near, 1, 1));

        let bottom_right = viewport.point_at(50, 21).unwrap();
        assert_eq!(bottom_right, Point::new(5.0, 8.0));
        assert_eq!(grid.nearest_cell(bottom_right), CellRef::new(Side::Far, 4, 5));
    }

    #[test]
    fn test_point_at_splits_halves_at_net() {
        let (viewport, grid) = viewport();
        // One row is half a logical unit; the net sits at y = 4.
        let above = viewport.point_at(30, 12).unwrap();
        let below = viewport.point_at(30, 13).unwrap();
        assert_eq!(grid.nearest_cell(above), CellRef::new(Side::Near, 4, 3));
        assert_eq!(grid.nearest_cell(below), CellRef::new(Side::Far, 1, 3));
    }

    #[test]
    fn test_point_at_outside_area() {
        let (viewport, _) = viewport();
        assert_eq!(viewport.point_at(9, 5), None);
        assert_eq!(viewport.point_at(51, 5), None);
        assert_eq!(viewport.point_at(10, 22), None);
    }

    #[test]
    fn test_clicks_round_trip_through_cell_centers() {
        let (viewport, grid) = viewport();
        for cell in grid.cells() {
            let (x, y) = viewport.to_canvas(grid.cell_center(cell));
            // Same truncation the canvas uses to place labels.
            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let (column, row) = (
                (x / viewport.column_width()) as u16 + 10,
                ((8.0 - y) / viewport.row_height()) as u16 + 5,
            );
            let point = viewport.point_at(column, row).unwrap();
            assert_eq!(grid.nearest_cell(point), cell, "cell {cell}");
        }
    }

    #[test]
    fn test_text_origin_centers_and_clamps() {
        let (viewport, _) = viewport();
        let (x, y) = viewport.text_origin(Point::new(2.5, 1.5), 4);
        assert!((x - 2.25).abs() < 1e-9);
        assert!((y - 6.5).abs() < 1e-9);

        let (x, _) = viewport.text_origin(Point::new(0.1, 1.5), 10);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn test_label_fits_in_cell() {
        let (viewport, grid) = viewport();
        // Eight columns per logical unit.
        assert!(viewport.fits_in_cell(&grid, 5));
        assert!(!viewport.fits_in_cell(&grid, 8));
    }
}
