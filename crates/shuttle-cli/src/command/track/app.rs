use crossterm::event::Event;
use ratatui::Frame;
use shuttle_engine::RallySession;

use crate::{
    command::track::screen::TrackScreen,
    tui::{App, RenderMode, Tui},
};

const FRAME_RATE: f64 = 60.0;

#[derive(Debug)]
pub struct TrackApp {
    screen: TrackScreen,
}

impl TrackApp {
    pub fn new(session: RallySession) -> Self {
        Self {
            screen: TrackScreen::new(session),
        }
    }

    pub fn into_session(self) -> RallySession {
        self.screen.into_session()
    }
}

impl App for TrackApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_render_mode(RenderMode::throttled_from_rate(FRAME_RATE));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.screen.draw(frame);
    }
}
