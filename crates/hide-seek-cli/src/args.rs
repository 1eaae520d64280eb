use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hide_seek::{GameConfig, Role, Shape};

#[derive(Parser)]
#[command(name = "hide-seek", about = "Hide & Seek: a zero-sum pursuit game solved by linear programming")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[command(flatten)]
    pub game: GameArgs,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the world's place types and payoff matrix
    Matrix {
        #[arg(long)]
        json: bool,
    },
    /// Print both sides' equilibrium strategies
    Solve {
        #[arg(long)]
        json: bool,
    },
    /// Let both equilibrium strategies play each other
    Simulate {
        #[arg(short, long, default_value_t = 1000)]
        rounds: u32,
        #[arg(long)]
        json: bool,
    },
    /// Play rounds against the computer
    Play,
}

#[derive(Args)]
pub struct GameArgs {
    /// JSON configuration file; flags below override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// 1-D world with this many positions
    #[arg(long, global = true, conflicts_with = "grid")]
    pub line: Option<usize>,
    /// 2-D world, e.g. 3x4
    #[arg(long, global = true, value_parser = parse_grid)]
    pub grid: Option<(usize, usize)>,
    /// Role the payoff matrix is written for
    #[arg(long, global = true)]
    pub perspective: Option<Role>,
    /// Role you play in `play`
    #[arg(long, global = true)]
    pub role: Option<Role>,
    /// Soften payoffs for near misses
    #[arg(long, global = true)]
    pub proximity: bool,
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

impl GameArgs {
    pub fn config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                GameConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
            }
            None => GameConfig::new(Shape::Line { size: 5 }),
        };
        if let Some(size) = self.line {
            config.shape = Shape::Line { size };
        }
        if let Some((rows, cols)) = self.grid {
            config.shape = Shape::Grid { rows, cols };
        }
        if let Some(perspective) = self.perspective {
            config.perspective = perspective;
        }
        if let Some(role) = self.role {
            config.human_role = role;
        }
        if self.proximity {
            config.proximity = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_grid(s: &str) -> Result<(usize, usize), String> {
    let (rows, cols) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected ROWSxCOLS, got {}", s))?;
    let rows = rows.trim().parse().map_err(|_| format!("bad row count: {}", rows))?;
    let cols = cols.trim().parse().map_err(|_| format!("bad column count: {}", cols))?;
    Ok((rows, cols))
}
