use crate::{
    ConfigError,
    config::{CourtConfig, SideDisplay},
    core::{CellLabel, CourtLayout, Side},
    engine::{
        LandingStats,
        rally::{ClosedRally, Rally, Shot},
        scoring::{GameNumber, ScoringRule},
    },
};

/// Points won by each side in the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    near: u32,
    far: u32,
}

impl Score {
    #[must_use]
    pub const fn new(near: u32, far: u32) -> Self {
        Self { near, far }
    }

    #[must_use]
    pub const fn near(&self) -> u32 {
        self.near
    }

    #[must_use]
    pub const fn far(&self) -> u32 {
        self.far
    }

    #[must_use]
    pub const fn get(&self, side: Side) -> u32 {
        match side {
            Side::Near => self.near,
            Side::Far => self.far,
        }
    }

    fn increment(&mut self, side: Side) {
        let points = match side {
            Side::Near => &mut self.near,
            Side::Far => &mut self.far,
        };
        *points = points.saturating_add(1);
    }
}

/// Final score of a game, appended to the game log by
/// [`RallySession::switch_game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub game_number: GameNumber,
    pub near_score: u32,
    pub far_score: u32,
    /// Display names the sides carried during that game.
    pub near_name: String,
    pub far_name: String,
}

/// Result of closing a non-empty rally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RallyOutcome {
    pub terminal: CellLabel,
    pub winner: Side,
    pub score: Score,
}

/// Value copy of the rollback-relevant fields, taken just before a rally
/// closes.
#[derive(Debug, Clone, PartialEq)]
struct RallySnapshot {
    score: Score,
    rally_number: u32,
    current_rally: Rally,
    rally_history: Vec<ClosedRally>,
}

/// Scorekeeping state for one tracking session.
///
/// All mutation goes through six actions:
///
/// | Action                                          | Effect                                        |
/// |-------------------------------------------------|-----------------------------------------------|
/// | [`add_point`](Self::add_point)                  | append a shot to the current rally            |
/// | [`end_rally`](Self::end_rally)                  | score the rally and move it into the history  |
/// | [`undo_last_shot`](Self::undo_last_shot)        | drop the last shot of the current rally       |
/// | [`undo_last_rally`](Self::undo_last_rally)      | roll back to just before the last `end_rally` |
/// | [`reset_current_rally`](Self::reset_current_rally) | drop every shot of the current rally       |
/// | [`switch_game`](Self::switch_game)              | log the game and start the next one           |
///
/// Every action is total. Undo calls with nothing to act on leave the session
/// unchanged, and closing an empty rally only advances the rally number, so
/// redundant clicks from a UI are harmless.
///
/// # Example
///
/// ```
/// use shuttle_engine::{CourtConfig, RallySession, Score, Side};
///
/// let mut session = RallySession::new(&CourtConfig::default()).unwrap();
/// session.add_point(Side::Near, 3, 3);
/// session.add_point(Side::Far, 1, 1); // far out-cell: near hit out
/// session.end_rally();
/// assert_eq!(session.score(), Score::new(0, 1));
///
/// session.undo_last_rally();
/// assert_eq!(session.score(), Score::new(0, 0));
/// assert_eq!(session.current_rally().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RallySession {
    layout: CourtLayout,
    scoring: ScoringRule,
    game_number: GameNumber,
    score: Score,
    rally_number: u32,
    current_rally: Rally,
    rally_history: Vec<ClosedRally>,
    undo_stack: Vec<RallySnapshot>,
    game_log: Vec<GameRecord>,
    side_display: SideDisplay,
}

impl RallySession {
    /// Validates `config` and creates a session at game 1 with no history.
    pub fn new(config: &CourtConfig) -> Result<Self, ConfigError> {
        let layout = config.layout()?;
        let scoring = config.scoring_rule(&layout)?;
        let side_display = config.side_display()?;
        Self::from_parts(layout, scoring, side_display)
    }

    /// Creates a session from already-built parts.
    ///
    /// Fails when `scoring` names a cell outside `layout`'s grid, as happens
    /// when the rule was built against a different layout.
    pub fn from_parts(
        layout: CourtLayout,
        scoring: ScoringRule,
        side_display: SideDisplay,
    ) -> Result<Self, ConfigError> {
        let grid = layout.grid();
        if let Some(cell) = scoring.near_scoring_cells().find(|&cell| !grid.contains(cell)) {
            return Err(ConfigError::ScoringCellOutOfRange {
                cell,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        Ok(Self {
            layout,
            scoring,
            game_number: GameNumber::FIRST,
            score: Score::default(),
            rally_number: 1,
            current_rally: Rally::new(),
            rally_history: vec![],
            undo_stack: vec![],
            game_log: vec![],
            side_display,
        })
    }

    #[must_use]
    pub const fn layout(&self) -> &CourtLayout {
        &self.layout
    }

    #[must_use]
    pub const fn scoring_rule(&self) -> &ScoringRule {
        &self.scoring
    }

    #[must_use]
    pub const fn game_number(&self) -> GameNumber {
        self.game_number
    }

    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// 1-based number of the rally being recorded in the current game.
    #[must_use]
    pub const fn rally_number(&self) -> u32 {
        self.rally_number
    }

    #[must_use]
    pub const fn current_rally(&self) -> &Rally {
        &self.current_rally
    }

    #[must_use]
    pub fn rally_history(&self) -> &[ClosedRally] {
        &self.rally_history
    }

    #[must_use]
    pub fn game_log(&self) -> &[GameRecord] {
        &self.game_log
    }

    #[must_use]
    pub const fn side_display(&self) -> &SideDisplay {
        &self.side_display
    }

    #[must_use]
    pub fn can_undo_rally(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Landing percentages over the rallies closed in the current game.
    #[must_use]
    pub fn landing_stats(&self) -> LandingStats {
        LandingStats::from_history(&self.rally_history, self.layout.grid())
    }

    /// Records a shot landing in `(row, col)` on `side`.
    ///
    /// Rows and columns outside the grid are clamped to the nearest edge.
    pub fn add_point(&mut self, side: Side, row: u8, col: u8) -> Shot {
        let cell = self.layout.grid().clamp(side, row, col);
        let shot = self.current_rally.append_shot(cell, &self.layout);
        log::trace!(
            "rally {} shot {} at {}",
            self.rally_number,
            self.current_rally.len(),
            shot.label()
        );
        shot
    }

    /// Scores the current rally and moves it into the history.
    ///
    /// The rally number advances either way. An empty rally scores nothing,
    /// leaves no undo snapshot and returns `None`.
    pub fn end_rally(&mut self) -> Option<RallyOutcome> {
        let Some(terminal) = self.current_rally.last_shot().map(Shot::label) else {
            self.rally_number = self.rally_number.saturating_add(1);
            log::debug!(
                "empty rally closed without scoring, now rally {}",
                self.rally_number
            );
            return None;
        };
        let winner = self.scoring.award_point(&terminal, self.game_number);
        let closed = ClosedRally::new(&self.current_rally, winner)?;

        self.undo_stack.push(self.snapshot());
        self.score.increment(winner);
        self.rally_history.push(closed);
        self.current_rally.clear();
        self.rally_number = self.rally_number.saturating_add(1);

        log::debug!(
            "game {} rally {} ended at {terminal}: {winner} scores ({}-{})",
            self.game_number,
            self.rally_history.len(),
            self.score.near,
            self.score.far,
        );
        Some(RallyOutcome {
            terminal,
            winner,
            score: self.score,
        })
    }

    /// Removes the last shot of the current rally, if any.
    pub fn undo_last_shot(&mut self) -> bool {
        self.current_rally.remove_last_shot().is_some()
    }

    /// Restores the state from just before the most recent [`end_rally`],
    /// reopening that rally as the current one.
    ///
    /// Shots recorded since that close are discarded. Returns `false` when
    /// there is nothing to roll back in the current game.
    ///
    /// [`end_rally`]: Self::end_rally
    pub fn undo_last_rally(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            log::debug!("undo rally ignored: no closed rally in game {}", self.game_number);
            return false;
        };
        let RallySnapshot {
            score,
            rally_number,
            current_rally,
            rally_history,
        } = snapshot;
        self.score = score;
        self.rally_number = rally_number;
        self.current_rally = current_rally;
        self.rally_history = rally_history;
        log::debug!(
            "rolled back to game {} rally {} ({}-{})",
            self.game_number,
            self.rally_number,
            self.score.near,
            self.score.far,
        );
        true
    }

    pub fn reset_current_rally(&mut self) {
        self.current_rally.clear();
    }

    /// Logs the finished game and starts the next one.
    ///
    /// Score, rally history and the undo stack are cleared; rallies from a
    /// finished game cannot be rolled back. Display names and colors swap
    /// between the sides while the sides themselves stay fixed.
    pub fn switch_game(&mut self) {
        let record = GameRecord {
            game_number: self.game_number,
            near_score: self.score.near,
            far_score: self.score.far,
            near_name: self.side_display.name(Side::Near).to_owned(),
            far_name: self.side_display.name(Side::Far).to_owned(),
        };
        log::debug!(
            "game {} finished: {} {} - {} {}",
            record.game_number,
            record.near_name,
            record.near_score,
            record.far_score,
            record.far_name,
        );
        self.game_log.push(record);

        self.score = Score::default();
        self.rally_number = 1;
        self.current_rally.clear();
        self.rally_history.clear();
        self.undo_stack.clear();
        self.game_number = self.game_number.next();
        self.side_display.swap();
    }

    fn snapshot(&self) -> RallySnapshot {
        RallySnapshot {
            score: self.score,
            rally_number: self.rally_number,
            current_rally: self.current_rally.clone(),
            rally_history: self.rally_history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellRef, GridConfig, Rgb, SideStyle};

    fn new_session() -> RallySession {
        RallySession::new(&CourtConfig::default()).unwrap()
    }

    fn play_rally(session: &mut RallySession, cells: &[(Side, u8, u8)]) -> Option<RallyOutcome> {
        for &(side, row, col) in cells {
            session.add_point(side, row, col);
        }
        session.end_rally()
    }

    #[test]
    fn test_initial_state() {
        let session = new_session();
        assert_eq!(session.game_number(), GameNumber::FIRST);
        assert_eq!(session.score(), Score::new(0, 0));
        assert_eq!(session.rally_number(), 1);
        assert!(session.current_rally().is_empty());
        assert!(session.rally_history().is_empty());
        assert!(session.game_log().is_empty());
        assert!(!session.can_undo_rally());
        assert_eq!(session.side_display().name(Side::Near), "Home");
    }

    #[test]
    fn test_invalid_config_fails_at_construction() {
        let config = CourtConfig {
            grid: GridConfig::STANDARD,
            near_out_cells: vec![(9, 9)],
            ..CourtConfig::default()
        };
        assert!(matches!(
            RallySession::new(&config),
            Err(ConfigError::OutCellOutOfRange { .. })
        ));
    }

    #[test]
    fn test_add_point_clamps() {
        let mut session = new_session();
        let shot = session.add_point(Side::Far, 0, 200);
        assert_eq!(shot.cell(), CellRef::new(Side::Far, 1, 5));
        assert_eq!(session.current_rally().len(), 1);
        assert_eq!(session.score(), Score::default());
    }

    #[test]
    fn test_scenario_near_out_cell_in_first_game() {
        // Near (1,1) is a near out-cell: the far side hit out, so near scores.
        let mut session = new_session();
        let outcome = play_rally(&mut session, &[(Side::Near, 1, 1)]).unwrap();
        assert!(outcome.terminal.is_out());
        assert_eq!(outcome.winner, Side::Near);
        assert_eq!(session.score(), Score::new(1, 0));
        assert_eq!(session.rally_number(), 2);
        assert_eq!(session.rally_history().len(), 1);
        assert!(session.current_rally().is_empty());
    }

    #[test]
    fn test_end_rally_uses_last_shot() {
        let mut session = new_session();
        let outcome = play_rally(
            &mut session,
            &[(Side::Near, 2, 2), (Side::Far, 2, 2), (Side::Near, 3, 3)],
        )
        .unwrap();
        // Near in-play cell ends the rally: far's shot was not returned.
        assert_eq!(outcome.terminal, session.layout().label(Side::Near, 3, 3));
        assert_eq!(outcome.winner, Side::Far);
        assert_eq!(outcome.score, Score::new(0, 1));
        assert_eq!(session.rally_history()[0].shots().len(), 3);
    }

    #[test]
    fn test_end_empty_rally_only_advances_rally_number() {
        let mut session = new_session();
        assert_eq!(session.rally_number(), 1);
        assert_eq!(session.end_rally(), None);
        assert_eq!(session.rally_number(), 2);
        assert_eq!(session.score(), Score::new(0, 0));
        assert!(session.rally_history().is_empty());
        assert!(!session.can_undo_rally());

        play_rally(&mut session, &[(Side::Far, 2, 3)]);
        let before = session.clone();
        assert_eq!(session.end_rally(), None);
        assert_eq!(session.rally_number(), before.rally_number() + 1);
        assert_eq!(session.score(), before.score());
        assert_eq!(session.rally_history(), before.rally_history());
        assert_eq!(session.undo_stack, before.undo_stack);

        // Rolling back skips over the empty close to the last scored rally.
        assert!(session.undo_last_rally());
        assert_eq!(session.rally_number(), 2);
        assert_eq!(session.current_rally().len(), 1);
        assert!(!session.can_undo_rally());
    }

    #[test]
    fn test_undo_last_shot_on_empty_rally_is_noop() {
        let mut session = new_session();
        play_rally(&mut session, &[(Side::Far, 2, 3)]);
        let before = session.clone();

        assert!(!session.undo_last_shot());
        assert_eq!(session, before);
    }

    #[test]
    fn test_undo_last_shot() {
        let mut session = new_session();
        session.add_point(Side::Near, 2, 2);
        session.add_point(Side::Far, 3, 3);
        assert!(session.undo_last_shot());
        assert_eq!(session.current_rally().len(), 1);
        assert_eq!(
            session.current_rally().shots()[0].cell(),
            CellRef::new(Side::Near, 2, 2)
        );
        assert!(session.rally_history().is_empty());
    }

    #[test]
    fn test_end_then_undo_restores_state() {
        let mut session = new_session();
        play_rally(&mut session, &[(Side::Near, 2, 2), (Side::Far, 1, 3)]);
        session.add_point(Side::Near, 2, 4);
        session.add_point(Side::Far, 4, 4);
        let before = session.clone();

        session.end_rally().unwrap();
        assert_ne!(session, before);
        assert!(session.undo_last_rally());
        assert_eq!(session, before);
    }

    #[test]
    fn test_undo_rally_reopens_closed_rally() {
        let mut session = new_session();
        play_rally(&mut session, &[(Side::Near, 2, 2), (Side::Far, 1, 3)]);
        session.add_point(Side::Near, 3, 3);

        assert!(session.undo_last_rally());
        assert_eq!(session.score(), Score::new(0, 0));
        assert_eq!(session.rally_number(), 1);
        assert!(session.rally_history().is_empty());
        let cells = session
            .current_rally()
            .shots()
            .iter()
            .map(Shot::cell)
            .collect::<Vec<_>>();
        assert_eq!(
            cells,
            [CellRef::new(Side::Near, 2, 2), CellRef::new(Side::Far, 1, 3)]
        );
    }

    #[test]
    fn test_undo_rally_steps_back_one_close_at_a_time() {
        let mut session = new_session();
        play_rally(&mut session, &[(Side::Far, 2, 2)]);
        play_rally(&mut session, &[(Side::Far, 2, 3)]);
        play_rally(&mut session, &[(Side::Near, 3, 3)]);
        assert_eq!(session.score(), Score::new(2, 1));

        assert!(session.undo_last_rally());
        assert_eq!(session.score(), Score::new(2, 0));
        assert!(session.undo_last_rally());
        assert_eq!(session.score(), Score::new(1, 0));
        assert!(session.undo_last_rally());
        assert_eq!(session.score(), Score::new(0, 0));
        assert!(!session.undo_last_rally());
        assert_eq!(session.current_rally().len(), 1);
    }

    #[test]
    fn test_undo_rally_with_empty_stack_is_noop() {
        let mut session = new_session();
        session.add_point(Side::Near, 2, 2);
        let before = session.clone();
        assert!(!session.undo_last_rally());
        assert_eq!(session, before);
    }

    #[test]
    fn test_reset_current_rally() {
        let mut session = new_session();
        play_rally(&mut session, &[(Side::Far, 2, 2)]);
        session.add_point(Side::Near, 2, 2);
        session.add_point(Side::Near, 3, 2);

        session.reset_current_rally();
        assert!(session.current_rally().is_empty());
        assert_eq!(session.score(), Score::new(1, 0));
        assert_eq!(session.rally_history().len(), 1);
        assert!(session.can_undo_rally());
    }

    #[test]
    fn test_switch_game() {
        let mut session = new_session();
        for _ in 0..3 {
            play_rally(&mut session, &[(Side::Far, 2, 3)]);
        }
        for _ in 0..2 {
            play_rally(&mut session, &[(Side::Near, 2, 3)]);
        }
        session.add_point(Side::Near, 2, 2);
        assert_eq!(session.score(), Score::new(3, 2));

        session.switch_game();
        assert_eq!(
            session.game_log(),
            [GameRecord {
                game_number: GameNumber::FIRST,
                near_score: 3,
                far_score: 2,
                near_name: "Home".to_owned(),
                far_name: "Visitor".to_owned(),
            }]
        );
        assert_eq!(session.score(), Score::new(0, 0));
        assert_eq!(session.game_number().get(), 2);
        assert_eq!(session.rally_number(), 1);
        assert!(session.current_rally().is_empty());
        assert!(session.rally_history().is_empty());
        assert!(!session.can_undo_rally());
        assert_eq!(session.side_display().name(Side::Near), "Visitor");
        assert_eq!(session.side_display().name(Side::Far), "Home");
        assert_eq!(session.side_display().color(Side::Near), Rgb::DODGER_BLUE);
    }

    #[test]
    fn test_switch_game_blocks_rollback() {
        let mut session = new_session();
        play_rally(&mut session, &[(Side::Far, 2, 3)]);
        session.switch_game();
        let before = session.clone();
        assert!(!session.undo_last_rally());
        assert_eq!(session, before);
    }

    #[test]
    fn test_scoring_inverts_in_second_game() {
        let mut session = new_session();
        let first = play_rally(&mut session, &[(Side::Far, 2, 3)]).unwrap();
        session.switch_game();
        let second = play_rally(&mut session, &[(Side::Far, 2, 3)]).unwrap();
        assert_eq!(first.winner, Side::Near);
        assert_eq!(second.winner, Side::Far);
        assert_eq!(session.score(), Score::new(0, 1));

        session.switch_game();
        let third = play_rally(&mut session, &[(Side::Far, 2, 3)]).unwrap();
        assert_eq!(third.winner, Side::Near);
        assert_eq!(session.side_display().name(Side::Near), "Home");
    }

    #[test]
    fn test_labels_ignore_display_swap() {
        let mut session = new_session();
        let before = session.add_point(Side::Near, 1, 1).label();
        session.reset_current_rally();
        session.switch_game();
        let after = session.add_point(Side::Near, 1, 1).label();
        assert_eq!(before, after);
    }

    #[test]
    fn test_from_parts_with_custom_rule() {
        let layout = CourtLayout::new(GridConfig::new(5, 5).unwrap(), [(1, 1)], [(5, 5)]).unwrap();
        let rule = ScoringRule::new(&layout, [CellRef::new(Side::Far, 5, 5)]).unwrap();
        let display = SideDisplay::new(
            SideStyle::new("Left", Rgb(255, 0, 0)),
            SideStyle::new("Right", Rgb(0, 0, 255)),
        )
        .unwrap();
        let mut session = RallySession::from_parts(layout, rule, display).unwrap();

        let outcome = play_rally(&mut session, &[(Side::Far, 5, 5)]).unwrap();
        assert_eq!(outcome.winner, Side::Near);
        let outcome = play_rally(&mut session, &[(Side::Near, 5, 5)]).unwrap();
        assert_eq!(outcome.winner, Side::Far);
    }

    #[test]
    fn test_from_parts_rejects_rule_for_other_layout() {
        let wide = CourtLayout::new(GridConfig::new(5, 5).unwrap(), [(1, 1)], [(5, 5)]).unwrap();
        let rule = ScoringRule::new(&wide, [CellRef::new(Side::Far, 5, 5)]).unwrap();
        let err = RallySession::from_parts(
            CourtLayout::standard(),
            rule,
            CourtConfig::default().side_display().unwrap(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ScoringCellOutOfRange {
                rows: 4,
                cols: 5,
                ..
            }
        ));
    }
}
