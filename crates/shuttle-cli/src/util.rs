use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use shuttle_engine::CourtConfig;

/// Writes `value` as pretty-printed JSON to `path`, or to stdout when no path
/// is given.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let Some(path) = path else {
        return write_pretty(&mut io::stdout().lock(), value)
            .context("Failed to write JSON to stdout");
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_pretty(&mut BufWriter::new(file), value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}

fn write_pretty<W, T>(writer: &mut W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads a court configuration, or returns the built-in one when no path is
/// given.
///
/// Only the JSON shape is checked here; semantic validation happens when a
/// session is built from the result.
pub fn load_court_config(path: Option<&Path>) -> anyhow::Result<CourtConfig> {
    let Some(path) = path else {
        return Ok(CourtConfig::default());
    };
    let file = File::open(path)
        .with_context(|| format!("Failed to open court config file: {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse court config file: {}", path.display()))?;
    log::info!("loaded court config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_saved_config_loads_back() {
        let path = env::temp_dir().join(format!("shuttle-util-{}.json", process::id()));
        let mut config = CourtConfig::default();
        config.near_out_cells = vec![(1, 1), (4, 5)];

        save_json(&config, Some(&path)).unwrap();
        let loaded = load_court_config(Some(&path));
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let path = env::temp_dir().join("shuttle-util-does-not-exist.json");
        let err = load_court_config(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open court config file"));
    }

    #[test]
    fn test_no_path_gives_default_config() {
        assert_eq!(load_court_config(None).unwrap(), CourtConfig::default());
    }
}
