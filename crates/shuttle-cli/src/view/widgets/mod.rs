use ratatui::{layout::Rect, style::Color, widgets::Block as BlockWidget};
use shuttle_engine::Rgb;

pub use self::{
    court_canvas::*, game_log_display::*, key_binding_display::*, landing_stats_display::*,
    score_display::*, trajectory_display::*,
};

mod court_canvas;
mod game_log_display;
mod key_binding_display;
mod landing_stats_display;
mod score_display;
mod trajectory_display;

mod color {
    use ratatui::style::Color;

    pub const COURT: Color = Color::Rgb(0, 128, 0);
    pub const COURT_LINE: Color = Color::Rgb(90, 190, 90);
    pub const NET: Color = Color::Rgb(255, 255, 255);
    pub const CELL_LABEL: Color = Color::Rgb(150, 210, 150);
    pub const OUT_LABEL: Color = Color::Rgb(40, 80, 40);
    pub const START: Color = Color::Rgb(255, 215, 0);
    pub const CURSOR: Color = Color::Rgb(255, 255, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Modifier, Style};

    use crate::view::widgets::color;

    pub const DEFAULT: Style = Style::new().fg(color::WHITE);
    pub const LABEL: Style = Style::new().fg(color::GRAY);
    pub const CELL_LABEL: Style = Style::new().fg(color::CELL_LABEL).bg(color::COURT);
    pub const OUT_LABEL: Style = Style::new().fg(color::OUT_LABEL).bg(color::COURT);
    pub const STEP: Style = Style::new()
        .fg(color::WHITE)
        .bg(color::COURT)
        .add_modifier(Modifier::BOLD);
    pub const TITLE: Style = Style::new().fg(color::WHITE).add_modifier(Modifier::BOLD);
}

/// Terminal color for a side's configured display color.
pub fn side_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}
