use std::path::PathBuf;
use std::str::FromStr;

use animatch_core::{CellIndex, Direction, DirectionMode, MatchPolicy};
use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a match-3 board and play swaps on it")]
pub struct Args {
    /// Optional TOML file with board settings; flags below override it.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Seed for board generation (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,
    /// Board width in tiles.
    #[arg(long)]
    pub width: Option<u8>,
    /// Board height in tiles.
    #[arg(long)]
    pub height: Option<u8>,
    /// How swap directions map to neighbours.
    #[arg(long, value_enum)]
    pub directions: Option<DirectionsArg>,
    /// What to do after a swap lands.
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
    /// Fixed board instead of a generated one, rows separated by '/', e.g. "MAN/IRS/GMA".
    #[arg(long, value_name = "ROWS")]
    pub board: Option<String>,
    /// Simulated frame rate used to drive swap animations.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,
    /// Print tile placement as JSON instead of the text grid.
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub verbose: Verbosity,
    /// Swaps to play, as INDEX:DIRECTION (e.g. 7:right). Reads commands from stdin
    /// when none are given.
    pub swaps: Vec<SwapCommand>,
}

impl Args {
    pub fn dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionsArg {
    Aliased,
    Corrected,
}

impl From<DirectionsArg> for DirectionMode {
    fn from(value: DirectionsArg) -> Self {
        match value {
            DirectionsArg::Aliased => DirectionMode::Aliased,
            DirectionsArg::Corrected => DirectionMode::Corrected,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Revert,
    Keep,
}

impl From<PolicyArg> for MatchPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Revert => MatchPolicy::AlwaysRevert,
            PolicyArg::Keep => MatchPolicy::KeepMatches,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwapCommand {
    pub index: CellIndex,
    pub direction: Direction,
}

pub fn parse_direction(s: &str) -> anyhow::Result<Direction> {
    Ok(match s.to_ascii_lowercase().as_str() {
        "up" | "u" => Direction::Up,
        "down" | "d" => Direction::Down,
        "left" | "l" => Direction::Left,
        "right" | "r" => Direction::Right,
        other => bail!("unknown direction {:?}", other),
    })
}

impl FromStr for SwapCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, direction) = s
            .split_once(':')
            .with_context(|| format!("expected INDEX:DIRECTION, got {:?}", s))?;
        Ok(Self {
            index: index
                .trim()
                .parse()
                .with_context(|| format!("bad tile index {:?}", index))?,
            direction: parse_direction(direction.trim())?,
        })
    }
}
