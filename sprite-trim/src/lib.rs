//! # sprite-trim
//!
//! Cuts off bytes appended after the end of PNG sprite frames.
//!
//! A frame ends at its `IEND` chunk: the 4-byte `IEND` tag followed by a
//! 4-byte CRC. Anything after that is dropped. The marker is found by a raw
//! byte search; no chunk parsing or CRC checking happens.
//!
//! ## Example
//!
//! ```no_run
//! use sprite_trim::{run, RunConfig, WriteMode};
//!
//! let config = RunConfig::new("assets/lama_sprite")
//!     .with_subdirs(["right", "left"])
//!     .with_write_mode(WriteMode::Atomic);
//!
//! let report = run(&config, &mut std::io::stdout()).unwrap();
//! assert!(!report.has_failures());
//! ```

mod error;
mod fixer;
mod marker;
mod outcome;

pub use error::FixError;
pub use fixer::{run, Report, RunConfig, SpriteFixer, WriteMode, DEFAULT_SUBDIRS};
pub use marker::{find_cutoff, Scan, IEND};
pub use outcome::{Outcome, OutcomeLine};
