//! The sprite fixer: per-file trimming and the directory run driver

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::FixError;
use crate::marker::Scan;
use crate::outcome::Outcome;

/// Subdirectories scanned when none are configured (right- and left-facing variants).
pub const DEFAULT_SUBDIRS: [&str; 2] = ["right", "left"];

/// How a trimmed file is written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write the kept bytes to a sibling temp file, then rename it over the original.
    #[default]
    Atomic,
    /// Truncate the original file in place.
    InPlace,
}

/// Everything a run needs to know: where to look and how to write.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub base_dir: PathBuf,
    pub subdirs: Vec<String>,
    pub write_mode: WriteMode,
    pub dry_run: bool,
    pub fail_fast: bool,
}

impl RunConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            subdirs: DEFAULT_SUBDIRS.iter().map(|s| s.to_string()).collect(),
            write_mode: WriteMode::default(),
            dry_run: false,
            fail_fast: false,
        }
    }

    pub fn with_subdirs<I, S>(mut self, subdirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subdirs = subdirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Trims trailing bytes after the IEND chunk of individual files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteFixer {
    write_mode: WriteMode,
    dry_run: bool,
}

impl SpriteFixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Read `path`, and if bytes follow the IEND CRC, cut them off.
    ///
    /// The file is written at most once, and only when trailing bytes exist
    /// and this is not a dry run.
    pub fn process(&self, path: &Path) -> Result<Outcome, FixError> {
        let data = fs::read(path).map_err(|source| FixError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match Scan::of(&data) {
            Scan::NoMarker => {
                log::debug!("{}: no IEND marker in {} bytes", path.display(), data.len());
                Ok(Outcome::NoMarker)
            }
            Scan::Clean { .. } => Ok(Outcome::Ok),
            Scan::Trailing { cutoff, excess } => {
                if self.dry_run {
                    log::info!("{}: dry run, keeping {} trailing bytes", path.display(), excess);
                } else {
                    self.write_trimmed(path, &data[..cutoff])
                        .map_err(|source| FixError::Write {
                            path: path.to_path_buf(),
                            source,
                        })?;
                }
                Ok(Outcome::Stripped { bytes: excess })
            }
        }
    }

    fn write_trimmed(&self, path: &Path, kept: &[u8]) -> io::Result<()> {
        match self.write_mode {
            WriteMode::Atomic => write_atomic(path, kept),
            WriteMode::InPlace => {
                let file = OpenOptions::new().write(true).open(path)?;
                file.set_len(kept.len() as u64)?;
                file.sync_all()
            }
        }
    }
}

impl From<&RunConfig> for SpriteFixer {
    fn from(config: &RunConfig) -> Self {
        Self::new()
            .with_write_mode(config.write_mode)
            .with_dry_run(config.dry_run)
    }
}

/// Sibling temp file used by [`WriteMode::Atomic`], hidden and in the same directory
/// so the final rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.spritefix.tmp", name))
}

/// Replace the file `path` resolves to, so symlinked sprites keep their link.
fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let target = fs::canonicalize(path)?;
    let tmp = temp_path(&target);
    log::debug!("writing {} bytes via {}", data.len(), tmp.display());

    let result = replace_with(&target, &tmp, data);
    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp) {
            log::debug!("could not remove {}: {}", tmp.display(), e);
        }
    }
    result
}

fn replace_with(path: &Path, tmp: &Path, data: &[u8]) -> io::Result<()> {
    let permissions = fs::metadata(path)?.permissions();
    let mut file = File::create(tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    fs::set_permissions(tmp, permissions)?;
    fs::rename(tmp, path)
}

/// Every `(path, outcome)` pair produced by a run, in processing order.
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<(PathBuf, Outcome)>,
}

impl Report {
    pub fn entries(&self) -> &[(PathBuf, Outcome)] {
        &self.entries
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|(_, outcome)| outcome.is_failure())
    }

    pub fn outcome(&self, path: &Path) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, outcome)| outcome)
    }
}

/// `.png` files directly inside `dir`, matched case-sensitively.
fn list_pngs(dir: &Path) -> Result<glob::Paths, FixError> {
    if !dir.is_dir() {
        return Err(FixError::MissingDir(dir.to_path_buf()));
    }

    let pattern = format!("{}/*.png", Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    glob::glob_with(&pattern, options).map_err(|source| FixError::Pattern {
        path: dir.to_path_buf(),
        source,
    })
}

/// Scan every configured subdirectory and trim each `.png` found there.
///
/// One status line per file goes to `out`. Failures become `ERROR:` lines and
/// the run moves on, unless `fail_fast` is set, in which case the first
/// failure is returned.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<Report, FixError> {
    let fixer = SpriteFixer::from(config);
    let mut report = Report::default();

    for subdir in &config.subdirs {
        let dir = config.base_dir.join(subdir);
        log::info!("Scanning {}", dir.display());

        let paths = match list_pngs(&dir) {
            Ok(paths) => paths,
            Err(e) => {
                settle(config, &mut report, out, dir, Err(e))?;
                continue;
            }
        };

        for entry in paths {
            let (path, result) = match entry {
                Ok(path) => {
                    let result = fixer.process(&path);
                    (path, result)
                }
                Err(e) => {
                    let path = e.path().to_path_buf();
                    let source = io::Error::new(e.error().kind(), e.to_string());
                    (
                        path.clone(),
                        Err(FixError::Read { path, source }),
                    )
                }
            };
            settle(config, &mut report, out, path, result)?;
        }
    }

    Ok(report)
}

fn settle<W: Write>(
    config: &RunConfig,
    report: &mut Report,
    out: &mut W,
    path: PathBuf,
    result: Result<Outcome, FixError>,
) -> Result<(), FixError> {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) if config.fail_fast => return Err(e),
        Err(e) => {
            log::debug!("{}", e);
            Outcome::Failed {
                reason: e.to_string(),
            }
        }
    };

    writeln!(out, "{}", outcome.line(&path))?;
    report.entries.push((path, outcome));
    Ok(())
}
