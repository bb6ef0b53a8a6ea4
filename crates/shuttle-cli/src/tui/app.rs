use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Application driven by [`Tui::run`].
pub trait App {
    /// Called once before the first frame. Configure the runtime here.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles key, mouse and resize events.
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws a frame.
    ///
    /// Takes `&mut self` so the app can remember where things landed on
    /// screen, e.g. to hit-test mouse clicks against the last frame.
    fn draw(&mut self, frame: &mut Frame);
}
