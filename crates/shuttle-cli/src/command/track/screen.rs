use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
    widgets::Block as BlockWidget,
};
use shuttle_engine::{CellRef, GridConfig, RallySession, Side};

use crate::view::widgets::{
    CourtViewport, GameLogDisplay, KeyBinding, KeyBindingDisplay, LandingStatsDisplay,
    ScoreDisplay, TrajectoryDisplay, style,
};

const PANEL_WIDTH: u16 = 34;

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["←↓↑→", "hjkl"], "move cursor"),
    (&["Enter", "Space"], "record shot"),
    (&["click"], "record shot"),
    (&["e"], "end rally"),
    (&["u", "Bksp"], "undo shot"),
    (&["U"], "undo rally"),
    (&["r"], "reset rally"),
    (&["g"], "next game"),
    (&["q", "Esc"], "quit"),
];

/// Interactive rally tracker: two courts and a control panel.
#[derive(Debug)]
pub struct TrackScreen {
    session: RallySession,
    cursor: CellRef,
    status: String,
    /// Court areas of the last frame, for mouse hit-testing.
    courts: Vec<CourtViewport>,
    is_exiting: bool,
}

impl TrackScreen {
    pub fn new(session: RallySession) -> Self {
        let grid = session.layout().grid();
        let cursor = grid.clamp(Side::Near, grid.rows().div_ceil(2), grid.cols().div_ceil(2));
        Self {
            session,
            cursor,
            status: "Record shots, then end the rally".to_owned(),
            courts: vec![],
            is_exiting: false,
        }
    }

    pub fn into_session(self) -> RallySession {
        self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let grid = *self.session.layout().grid();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = move_cursor(&grid, self.cursor, -1, 0);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = move_cursor(&grid, self.cursor, 1, 0);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = move_cursor(&grid, self.cursor, 0, -1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = move_cursor(&grid, self.cursor, 0, 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.record_shot(self.cursor),
            KeyCode::Char('e') => self.end_rally(),
            KeyCode::Char('u') | KeyCode::Backspace => self.undo_last_shot(),
            KeyCode::Char('U') => self.undo_last_rally(),
            KeyCode::Char('r') => self.reset_current_rally(),
            KeyCode::Char('g') => self.switch_game(),
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(point) = self
            .courts
            .iter()
            .find_map(|court| court.point_at(mouse.column, mouse.row))
        else {
            return;
        };
        let cell = self.session.layout().grid().nearest_cell(point);
        self.cursor = cell;
        self.record_shot(cell);
    }

    fn record_shot(&mut self, cell: CellRef) {
        let shot = self
            .session
            .add_point(cell.side(), cell.row(), cell.col());
        self.status = format!(
            "Shot {} at {}",
            self.session.current_rally().len(),
            shot.label()
        );
    }

    fn end_rally(&mut self) {
        self.status = match self.session.end_rally() {
            Some(outcome) => {
                let display = self.session.side_display();
                format!(
                    "Point {} ({}): {} - {}",
                    display.name(outcome.winner),
                    outcome.terminal,
                    outcome.score.near(),
                    outcome.score.far()
                )
            }
            None => "No shots recorded, nothing to score".to_owned(),
        };
    }

    fn undo_last_shot(&mut self) {
        self.status = if self.session.undo_last_shot() {
            "Removed last shot".to_owned()
        } else {
            "No shot to remove".to_owned()
        };
    }

    fn undo_last_rally(&mut self) {
        self.status = if self.session.undo_last_rally() {
            format!("Reopened rally {}", self.session.rally_number())
        } else {
            "No rally to undo in this game".to_owned()
        };
    }

    fn reset_current_rally(&mut self) {
        self.status = if self.session.current_rally().is_empty() {
            "Rally is already empty".to_owned()
        } else {
            self.session.reset_current_rally();
            "Cleared current rally".to_owned()
        };
    }

    fn switch_game(&mut self) {
        self.session.switch_game();
        self.status = format!("Game {} started, ends changed", self.session.game_number());
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let [courts_area, panel_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(PANEL_WIDTH)])
                .areas(frame.area());
        let [trajectory_area, stats_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(courts_area);

        let session = &self.session;
        let display = session.side_display();

        let trajectory = TrajectoryDisplay::new(session)
            .cursor(self.cursor)
            .block(BlockWidget::bordered().title(format!(" Rally {} ", session.rally_number())));

        let stats = LandingStatsDisplay::new(session);
        let stats_title = format!(
            " Landing % ({} {} / {} {}) ",
            display.name(Side::Near),
            stats.stats().total(Side::Near),
            display.name(Side::Far),
            stats.stats().total(Side::Far),
        );
        let stats = stats.block(BlockWidget::bordered().title(stats_title));

        self.courts = vec![
            trajectory.viewport(trajectory_area),
            stats.viewport(stats_area),
        ];
        frame.render_widget(&trajectory, trajectory_area);
        frame.render_widget(&stats, stats_area);

        let score = ScoreDisplay::new(session).block(BlockWidget::bordered().title(" Score "));
        let keys =
            KeyBindingDisplay::new(KEY_BINDINGS).block(BlockWidget::bordered().title(" Keys "));
        let [score_area, log_area, keys_area, status_area] = Layout::vertical([
            Constraint::Length(score.height()),
            Constraint::Min(3),
            Constraint::Length(keys.height()),
            Constraint::Length(3),
        ])
        .areas(panel_area);

        frame.render_widget(score, score_area);
        frame.render_widget(
            GameLogDisplay::new(session.game_log())
                .block(BlockWidget::bordered().title(" Games ")),
            log_area,
        );
        frame.render_widget(keys, keys_area);

        let status_block = BlockWidget::bordered().title(" Status ");
        let status_inner = status_block.inner(status_area);
        frame.render_widget(status_block, status_area);
        frame.render_widget(
            Line::styled(self.status.as_str(), style::DEFAULT),
            status_inner,
        );
    }
}

/// Moves `cursor` by whole cells. Rows run from the near back line across
/// the net to the far back line; movement stops at the court edges.
fn move_cursor(grid: &GridConfig, cursor: CellRef, rows: i16, cols: i16) -> CellRef {
    let half = i16::from(grid.rows());
    let row = match cursor.side() {
        Side::Near => i16::from(cursor.row()) - 1,
        Side::Far => half + i16::from(cursor.row()) - 1,
    };
    let row = (row + rows).clamp(0, 2 * half - 1);
    let col = (i16::from(cursor.col()) + cols).clamp(1, i16::from(grid.cols()));
    let (side, row) = if row < half {
        (Side::Near, row + 1)
    } else {
        (Side::Far, row - half + 1)
    };
    grid.clamp(
        side,
        u8::try_from(row).unwrap_or(u8::MAX),
        u8::try_from(col).unwrap_or(u8::MAX),
    )
}
