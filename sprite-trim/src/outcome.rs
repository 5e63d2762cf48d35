//! Per-file results and their console lines

use std::fmt;
use std::path::Path;

/// What happened to a single sprite file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Trailing bytes were removed (or would be, in a dry run).
    Stripped { bytes: usize },
    /// The file already ends at its IEND CRC.
    Ok,
    /// No `IEND` marker in the file; left untouched.
    NoMarker,
    /// Reading or writing failed.
    Failed { reason: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Bind this outcome to a file name for printing.
    pub fn line<'a>(&'a self, path: &'a Path) -> OutcomeLine<'a> {
        OutcomeLine { outcome: self, path }
    }
}

/// Display adapter producing exactly one status line (without newline).
pub struct OutcomeLine<'a> {
    outcome: &'a Outcome,
    path: &'a Path,
}

impl fmt::Display for OutcomeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.path.to_string_lossy());

        match self.outcome {
            Outcome::Stripped { bytes } => {
                write!(f, "Stripping {} trailing bytes from {}", bytes, name)
            }
            Outcome::Ok => write!(f, "OK: {}", name),
            Outcome::NoMarker => write!(f, "WARNING: No IEND found in {}", name),
            Outcome::Failed { reason } => write!(f, "ERROR: {}", reason),
        }
    }
}
