use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block as BlockWidget, BlockExt as _, Widget, canvas::Context},
};
use shuttle_engine::{LandingStats, RallySession};

use crate::view::widgets::{self, CourtViewport, style};

/// Court showing where rallies of the current game ended, as a percentage
/// of each side's total.
#[derive(Debug)]
pub struct LandingStatsDisplay<'a> {
    session: &'a RallySession,
    stats: LandingStats,
    block: Option<BlockWidget<'a>>,
}

impl<'a> LandingStatsDisplay<'a> {
    pub fn new(session: &'a RallySession) -> Self {
        Self {
            session,
            stats: session.landing_stats(),
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn stats(&self) -> &LandingStats {
        &self.stats
    }

    pub fn viewport(&self, area: Rect) -> CourtViewport {
        CourtViewport::new(
            self.block.inner_if_some(area),
            self.session.layout().grid(),
        )
    }

    fn paint(&self, ctx: &mut Context, viewport: &CourtViewport) {
        let grid = self.session.layout().grid();
        let display = self.session.side_display();

        widgets::paint_court(ctx, viewport, grid);
        ctx.layer();
        for (cell, pct) in self.stats.iter() {
            let text = format!("{pct:.1}%");
            let style = if self.stats.count(cell) == 0 {
                style::OUT_LABEL
            } else {
                Style::new()
                    .fg(widgets::side_color(display.color(cell.side())))
                    .bg(widgets::color::COURT)
            };
            widgets::print_in_cell(ctx, viewport, grid, cell, text, style);
        }
    }
}

impl Widget for LandingStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &LandingStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let viewport = self.viewport(area);
        let inner = self.block.inner_if_some(area);
        viewport
            .canvas(|ctx| self.paint(ctx, &viewport))
            .render(inner, buf);
    }
}
