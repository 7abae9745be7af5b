use std::io;
use thiserror::Error;

/// Failures of the terminal shell around the game. The game itself never fails.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("logger could not be installed: {0}")]
    Logger(#[from] log::SetLoggerError),
}
