use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use shuttle_engine::{RallySession, Side};

use crate::view::widgets::{self, style};

const ROW_COUNT: u16 = 6;

/// Game, rally and score summary for the control panel.
#[derive(Debug)]
pub struct ScoreDisplay<'a> {
    session: &'a RallySession,
    block: Option<BlockWidget<'a>>,
}

struct Row {
    label: String,
    label_style: Style,
    value: String,
    value_style: Style,
}

impl Row {
    fn plain(label: &str, value: String) -> Self {
        Self {
            label: label.to_owned(),
            label_style: style::LABEL,
            value,
            value_style: style::DEFAULT,
        }
    }
}

impl<'a> ScoreDisplay<'a> {
    pub fn new(session: &'a RallySession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        ROW_COUNT + super::block_vertical_margin(self.block.as_ref())
    }

    fn rows(&self) -> [Row; ROW_COUNT as usize] {
        let session = self.session;
        let display = session.side_display();
        let side_row = |side: Side| {
            let color = widgets::side_color(display.color(side));
            Row {
                label: display.name(side).to_owned(),
                label_style: Style::new().fg(color),
                value: session.score().get(side).to_string(),
                value_style: style::TITLE.fg(color),
            }
        };
        let last = session
            .current_rally()
            .last_shot()
            .or_else(|| {
                session
                    .rally_history()
                    .last()
                    .and_then(|rally| rally.shots().last())
            })
            .map_or_else(|| "-".to_owned(), |shot| shot.label().to_string());

        [
            Row::plain("GAME", session.game_number().to_string()),
            Row::plain("RALLY", session.rally_number().to_string()),
            side_row(Side::Near),
            side_row(Side::Far),
            Row::plain("SHOTS", session.current_rally().len().to_string()),
            Row::plain("LAST", last),
        ]
    }
}

impl Widget for ScoreDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = self.rows();
        let row_areas = Layout::vertical(rows.iter().map(|_| Constraint::Length(1))).split(area);
        for (row, area) in iter::zip(rows, row_areas.iter().copied()) {
            let [label_area, value_area] = area.layout(&Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Fill(1),
            ]));
            Line::styled(row.label, row.label_style)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(row.value, row.value_style)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
