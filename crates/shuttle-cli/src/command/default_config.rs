use std::path::PathBuf;

use shuttle_engine::CourtConfig;

use crate::{logging, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DefaultConfigArg {
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DefaultConfigArg) -> anyhow::Result<()> {
    let DefaultConfigArg { output } = arg;
    logging::init_stderr();

    util::save_json(&CourtConfig::default(), output.as_deref())
}
