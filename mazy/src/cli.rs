use std::path::PathBuf;

use clap::Parser;
use cmazy::{algorithms::validate_size, dims::Dims, runner::Strategy, MazeSpec};
use log::LevelFilter;

use crate::{error::AppError, settings::Settings};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "mazy")]
pub struct Args {
    #[clap(long, help = "Maze width, odd and at least 5")]
    pub width: Option<i32>,
    #[clap(long, help = "Maze height, odd and at least 5")]
    pub height: Option<i32>,
    #[clap(long, help = "Seed for a reproducible maze")]
    pub seed: Option<u64>,
    #[clap(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Wrap neighbor lookups around the edges, `--toroidal false` turns it off"
    )]
    pub toroidal: Option<bool>,
    #[clap(
        long = "runner",
        help = "Runner to race, repeatable: random, right-hand, left-hand, greedy"
    )]
    pub runners: Vec<Strategy>,
    #[clap(short, long, action, help = "Run the runners on all cores")]
    pub parallel: bool,
    #[clap(short, long, help = "Settings file to use instead of the default one")]
    pub config: Option<PathBuf>,
    #[clap(short, long, action, help = "Log debug messages to stderr")]
    pub verbose: bool,
    #[clap(short, long, action, help = "Reset config to default and quit")]
    pub reset_config: bool,
    #[clap(short, long, action, help = "Show config path and quit")]
    pub show_config_path: bool,
    #[clap(long, action, help = "Show config in debug format and quit")]
    pub debug_config: bool,
}

/// Everything needed for one invocation, flags merged over settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub spec: MazeSpec,
    pub runners: Vec<Strategy>,
    pub parallel: bool,
    pub log_level: LevelFilter,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Settings::default_path)
    }

    /// Fails on sizes the maze can't be carved with, so the core never sees them.
    pub fn resolve(&self, settings: &Settings) -> Result<RunConfig, AppError> {
        let defaults = MazeSpec::default();
        let size = Dims(
            self.width.or(settings.width).unwrap_or(defaults.size.0),
            self.height.or(settings.height).unwrap_or(defaults.size.1),
        );
        validate_size(size)?;

        let runners = if !self.runners.is_empty() {
            self.runners.clone()
        } else {
            settings
                .runners
                .clone()
                .unwrap_or_else(|| Strategy::ALL.to_vec())
        };

        let log_level = if self.verbose {
            LevelFilter::Debug
        } else {
            settings.log_level()?.unwrap_or(LevelFilter::Warn)
        };

        Ok(RunConfig {
            spec: MazeSpec {
                size,
                toroidal: self.toroidal.or(settings.toroidal).unwrap_or(false),
                seed: self.seed.or(settings.seed),
                ..defaults
            },
            runners,
            parallel: self.parallel,
            log_level,
        })
    }
}
