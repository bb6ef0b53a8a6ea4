use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use shuttle_engine::GameRecord;

use crate::view::widgets::style;

/// Final scores of finished games, most recent last.
#[derive(Debug)]
pub struct GameLogDisplay<'a> {
    records: &'a [GameRecord],
    block: Option<BlockWidget<'a>>,
}

impl<'a> GameLogDisplay<'a> {
    pub fn new(records: &'a [GameRecord]) -> Self {
        Self {
            records,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

fn record_line(record: &GameRecord) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!("G{} ", record.game_number), style::LABEL),
        Span::styled(
            format!(
                "{} {}-{} {}",
                record.near_name, record.near_score, record.far_score, record.far_name
            ),
            style::DEFAULT,
        ),
    ])
}

impl Widget for GameLogDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        if self.records.is_empty() {
            Line::styled("no finished games", style::LABEL).render(area, buf);
            return;
        }
        // Keep the latest games visible when the log outgrows the panel.
        let visible = usize::from(area.height).min(self.records.len());
        let records = &self.records[self.records.len() - visible..];
        for (record, y) in records.iter().zip(area.top()..area.bottom()) {
            record_line(record).render(Rect { y, height: 1, ..area }, buf);
        }
    }
}
