use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use wayfinder_core::{SimulationConfig, TerrainGrid};

const SUPPORTED_SETTINGS_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    version: u32,
    #[serde(default)]
    simulation: SimulationConfig,
}

/// Reads simulation parameters from a versioned TOML settings file.
pub(crate) fn load(path: &Path) -> Result<SimulationConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid settings file {}", path.display()))
}

fn parse(contents: &str) -> Result<SimulationConfig> {
    let settings: SettingsFile =
        toml::from_str(contents).context("failed to parse settings toml contents")?;
    if settings.version != SUPPORTED_SETTINGS_VERSION {
        bail!(
            "unsupported settings version {}; expected {}",
            settings.version,
            SUPPORTED_SETTINGS_VERSION
        );
    }

    Ok(settings.simulation)
}

/// Reads a terrain map drawn with `.`, `#` and `^`, one line per row.
pub(crate) fn load_map(path: &Path) -> Result<TerrainGrid> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read map file at {}", path.display()))?;
    parse_map(&contents).with_context(|| format!("invalid map file {}", path.display()))
}

fn parse_map(contents: &str) -> Result<TerrainGrid> {
    let rows: Vec<&str> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if rows.is_empty() {
        bail!("map contains no rows");
    }

    Ok(TerrainGrid::from_rows(&rows)?)
}
