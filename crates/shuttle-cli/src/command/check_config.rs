use std::{fmt::Write as _, path::PathBuf};

use anyhow::Context as _;
use shuttle_engine::{CellPos, CourtConfig, RallySession, Rgb, Side};

use crate::{logging, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CheckConfigArg {
    /// Court configuration file (JSON)
    config: PathBuf,
}

pub(crate) fn run(arg: &CheckConfigArg) -> anyhow::Result<()> {
    let CheckConfigArg { config } = arg;
    logging::init_stderr();

    let court = util::load_court_config(Some(config.as_path()))?;
    let session = RallySession::new(&court)
        .with_context(|| format!("Invalid court configuration: {}", config.display()))?;

    print!("{}", summarize(&court, &session));
    Ok(())
}

fn summarize(config: &CourtConfig, session: &RallySession) -> String {
    let grid = session.layout().grid();
    let display = session.side_display();
    let mut out = String::new();

    _ = writeln!(
        out,
        "grid: {} rows x {} cols, cell {} x {}",
        grid.rows(),
        grid.cols(),
        grid.cell_width(),
        grid.cell_height()
    );
    for side in Side::ALL {
        let style = display.get(side);
        let Rgb(r, g, b) = style.color;
        _ = writeln!(out, "{side} side: {} (#{r:02x}{g:02x}{b:02x})", style.name);
    }
    for side in Side::ALL {
        let cells = session.layout().out_cells(side).collect::<Vec<_>>();
        _ = writeln!(
            out,
            "{side} out-cells ({}): {}",
            cells.len(),
            join_positions(&cells)
        );
    }

    let scoring = session
        .scoring_rule()
        .near_scoring_cells()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>();
    let source = if config.near_scoring_cells.is_some() {
        "explicit"
    } else {
        "standard"
    };
    _ = writeln!(
        out,
        "near-scoring cells ({}, {source}): {}",
        scoring.len(),
        scoring.join(" ")
    );
    out
}

fn join_positions(cells: &[CellPos]) -> String {
    cells
        .iter()
        .map(|(row, col)| format!("({row},{col})"))
        .collect::<Vec<_>>()
        .join(" ")
}
