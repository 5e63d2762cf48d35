//! IEND marker search and cutoff calculation

use memchr::memmem;

/// ASCII `IEND`, the type tag of the terminating PNG chunk.
pub const IEND: &[u8; 4] = b"IEND";

/// Bytes kept after the start of the marker: the type tag plus its CRC.
pub const IEND_TAIL_BYTES: usize = 8;

/// Classification of a PNG byte stream against its first `IEND` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// No `IEND` anywhere in the stream.
    NoMarker,
    /// The stream ends at (or before) the cutoff.
    Clean { cutoff: usize },
    /// `excess` bytes follow the cutoff.
    Trailing { cutoff: usize, excess: usize },
}

impl Scan {
    /// Classify `data` by locating the first `IEND`.
    pub fn of(data: &[u8]) -> Self {
        let Some(cutoff) = find_cutoff(data) else {
            return Self::NoMarker;
        };

        if data.len() > cutoff {
            Self::Trailing {
                cutoff,
                excess: data.len() - cutoff,
            }
        } else {
            if data.len() < cutoff {
                log::debug!(
                    "IEND CRC is short by {} bytes, leaving stream as is",
                    cutoff - data.len()
                );
            }
            Self::Clean { cutoff }
        }
    }
}

/// Offset one past the IEND CRC, i.e. first marker index + 8.
pub fn find_cutoff(data: &[u8]) -> Option<usize> {
    memmem::find(data, IEND).map(|i| i + IEND_TAIL_BYTES)
}
