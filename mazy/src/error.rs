use std::io;

use cmazy::MazeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Maze(#[from] MazeError),
    #[error("settings I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("settings parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("settings serialize error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
    #[error("logger already installed: {0}")]
    Logger(#[from] log::SetLoggerError),
}
