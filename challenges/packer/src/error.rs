use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a run. Malformed lines and items are not in here: they are logged
/// and skipped.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not read input: {0}")]
    Io(#[from] io::Error),
    #[error("solver task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error("worker pool closed")]
    PoolClosed(#[from] tokio::sync::AcquireError),
}

pub type Result<T> = std::result::Result<T, Error>;
