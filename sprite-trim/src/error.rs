use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("sprite directory not found: {}", .0.display())]
    MissingDir(PathBuf),
    #[error("bad glob pattern for {}: {source}", .path.display())]
    Pattern {
        path: PathBuf,
        source: glob::PatternError,
    },
    #[error("failed to write status line: {0}")]
    Output(#[from] std::io::Error),
}
