use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    text::Span,
    widgets::{
        Block as BlockWidget, BlockExt as _, Widget,
        canvas::{Circle, Context, Line as CanvasLine, Rectangle},
    },
};
use shuttle_engine::{CellRef, Point, RallySession, Segment};

use crate::view::widgets::{self, CourtViewport, color, style};

const ARROW_HEAD_ANGLE: f64 = 160.0;

/// Court with the path of the rally being recorded.
///
/// Arrows connect consecutive shots and take the striker's color; each arrow
/// is numbered with the index of the shot it points to. The first shot is
/// marked with a dot.
#[derive(Debug)]
pub struct TrajectoryDisplay<'a> {
    session: &'a RallySession,
    cursor: Option<CellRef>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> TrajectoryDisplay<'a> {
    pub fn new(session: &'a RallySession) -> Self {
        Self {
            session,
            cursor: None,
            block: None,
        }
    }

    pub fn cursor(self, cursor: CellRef) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    /// Where the court lands when rendered into `area`.
    pub fn viewport(&self, area: Rect) -> CourtViewport {
        CourtViewport::new(
            self.block.inner_if_some(area),
            self.session.layout().grid(),
        )
    }

    fn paint(&self, ctx: &mut Context, viewport: &CourtViewport) {
        let layout = self.session.layout();
        let grid = layout.grid();
        let display = self.session.side_display();
        let rally = self.session.current_rally();

        widgets::paint_court(ctx, viewport, grid);
        if let Some(cursor) = self.cursor {
            let center = grid.cell_center(cursor);
            let (x, y) = viewport.to_canvas(center);
            let (inset_x, inset_y) = (grid.cell_width() * 0.1, grid.cell_height() * 0.1);
            ctx.draw(&Rectangle {
                x: x - grid.cell_width() / 2.0 + inset_x,
                y: y - grid.cell_height() / 2.0 + inset_y,
                width: grid.cell_width() - 2.0 * inset_x,
                height: grid.cell_height() - 2.0 * inset_y,
                color: color::CURSOR,
            });
        }
        ctx.layer();

        let head_len = grid.cell_width().min(grid.cell_height()) * 0.25;
        for segment in rally.segments() {
            let color = widgets::side_color(display.color(segment.striker));
            paint_arrow(ctx, viewport, &segment, head_len, color);
        }
        if let Some(first) = rally.shots().first() {
            let (x, y) = viewport.to_canvas(first.point());
            ctx.draw(&Circle {
                x,
                y,
                radius: head_len * 0.5,
                color: color::START,
            });
        }

        widgets::print_cell_labels(ctx, viewport, layout);
        for segment in rally.segments() {
            let text = segment.step.to_string();
            let mid = segment.from.midpoint(segment.to);
            // Keep the number off the arrow: above it when heading to the
            // near half, below it otherwise.
            let offset = if segment.to.y < grid.midline() {
                -viewport.row_height()
            } else {
                viewport.row_height()
            };
            let (x, y) = viewport.text_origin(Point::new(mid.x, mid.y + offset), text.len());
            ctx.print(x, y, Span::styled(text, style::STEP));
        }
    }
}

fn paint_arrow(
    ctx: &mut Context,
    viewport: &CourtViewport,
    segment: &Segment,
    head_len: f64,
    color: Color,
) {
    let (x1, y1) = viewport.to_canvas(segment.from);
    let (x2, y2) = viewport.to_canvas(segment.to);
    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
    let (dx, dy) = (x2 - x1, y2 - y1);
    if dx == 0.0 && dy == 0.0 {
        return;
    }
    let angle = dy.atan2(dx);
    for side in [1.0, -1.0] {
        let head = angle + side * ARROW_HEAD_ANGLE.to_radians();
        ctx.draw(&CanvasLine::new(
            x2,
            y2,
            x2 + head_len * head.cos(),
            y2 + head_len * head.sin(),
            color,
        ));
    }
}

impl Widget for TrajectoryDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TrajectoryDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let viewport = self.viewport(area);
        let inner = self.block.inner_if_some(area);
        viewport
            .canvas(|ctx| self.paint(ctx, &viewport))
            .render(inner, buf);
    }
}
