use std::path::PathBuf;

use anyhow::Context as _;
use shuttle_engine::{RallySession, Side};

use crate::{logging, tui::Tui, util};

use self::app::TrackApp;

mod app;
mod screen;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrackArg {
    /// Court configuration file (JSON); the built-in court is used if omitted
    #[clap(long)]
    config: Option<PathBuf>,
    /// Write logs to this file (logging is off while tracking otherwise)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrackArg) -> anyhow::Result<()> {
    let TrackArg { config, log_file } = arg;
    logging::init_for_tui(log_file.as_deref())?;

    let court = util::load_court_config(config.as_deref())?;
    let session = RallySession::new(&court).context("Invalid court configuration")?;
    log::info!(
        "tracking {} vs {}",
        session.side_display().name(Side::Near),
        session.side_display().name(Side::Far)
    );

    let mut app = TrackApp::new(session);
    Tui::new().run(&mut app)?;

    let session = app.into_session();
    for line in summary_lines(&session) {
        println!("{line}");
    }
    Ok(())
}

/// Final scores printed once the terminal is restored.
fn summary_lines(session: &RallySession) -> Vec<String> {
    let display = session.side_display();
    let score = session.score();
    let finished = session.game_log().iter().map(|record| {
        format!(
            "Game {}: {} {} - {} {}",
            record.game_number,
            record.near_name,
            record.near_score,
            record.far_score,
            record.far_name
        )
    });
    let current = (score.near() > 0 || score.far() > 0).then(|| {
        format!(
            "Game {} (unfinished): {} {} - {} {}",
            session.game_number(),
            display.name(Side::Near),
            score.near(),
            score.far(),
            display.name(Side::Far)
        )
    });
    finished.chain(current).collect()
}
