use std::fs;
use std::path::Path;

use animatch_core::BoardConfig;
use anyhow::{Context, Result};

use crate::args::Args;

pub fn read_config_file(path: &Path) -> Result<BoardConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<BoardConfig> {
    Ok(toml::from_str(text)?)
}

/// File settings (or defaults) with command line overrides applied on top.
pub fn resolve(args: &Args) -> Result<BoardConfig> {
    let mut config = match &args.config {
        Some(path) => read_config_file(path)?,
        None => BoardConfig::default(),
    };

    let (width, height) = config.size;
    config = BoardConfig {
        size: BoardConfig::new((args.width.unwrap_or(width), args.height.unwrap_or(height))).size,
        ..config
    };
    if let Some(directions) = args.directions {
        config.direction_mode = directions.into();
    }
    if let Some(policy) = args.policy {
        config.match_policy = policy.into();
    }
    config.validate()?;
    log::debug!("Resolved config: {:?}", config);
    Ok(config)
}
