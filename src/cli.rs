//! Command line arguments and how they combine with the config file

use std::path::{Path, PathBuf};

use clap::Parser;
use sprite_trim::{RunConfig, WriteMode};

use crate::config::{Config, ConfigError, DEFAULT_CONFIG};

#[derive(Parser, Debug)]
#[command(
    name = "spritefix",
    version,
    about = "Strip bytes trailing the IEND chunk of PNG sprite frames"
)]
pub struct Cli {
    /// Config file (default: spritefix.toml in the working directory, if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the sprite subdirectories (overrides base_dir)
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Subdirectory to scan; repeat to scan several (replaces subdirs)
    #[arg(long = "subdir", value_name = "NAME")]
    pub subdirs: Vec<String>,

    /// Report what would be stripped without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Truncate files in place instead of replacing them via a temp file
    #[arg(long)]
    pub in_place: bool,

    /// Stop at the first file or directory that fails
    #[arg(long)]
    pub fail_fast: bool,
}

impl Cli {
    /// Resolve the run configuration, reading `spritefix.toml` when no `--config` is given.
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        self.run_config_with_default(Path::new(DEFAULT_CONFIG))
    }

    fn run_config_with_default(&self, default_path: &Path) -> Result<RunConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(default_path)?,
        };
        self.merge(config)
    }

    /// Apply command line overrides on top of `config`.
    pub fn merge(&self, config: Config) -> Result<RunConfig, ConfigError> {
        let base_dir = self
            .base_dir
            .clone()
            .or(config.base_dir.clone())
            .ok_or(ConfigError::MissingBaseDir)?;

        let subdirs = if self.subdirs.is_empty() {
            config.subdirs.clone()
        } else {
            self.subdirs.clone()
        };
        if subdirs.is_empty() {
            log::warn!("No subdirectories configured, nothing to scan");
        }

        let write_mode = if self.in_place {
            WriteMode::InPlace
        } else {
            config.write_mode()
        };

        Ok(RunConfig::new(base_dir)
            .with_subdirs(subdirs)
            .with_write_mode(write_mode)
            .with_dry_run(self.dry_run)
            .with_fail_fast(self.fail_fast))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spritefix").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config::parse(
            r#"
            base_dir = "from/file"
            subdirs = ["a", "b"]
            "#,
        )
        .unwrap();

        let run = cli(&["--base-dir", "from/cli", "--subdir", "c", "--in-place"])
            .merge(config)
            .unwrap();
        assert_eq!(run.base_dir, PathBuf::from("from/cli"));
        assert_eq!(run.subdirs, vec!["c"]);
        assert_eq!(run.write_mode, WriteMode::InPlace);
        assert!(!run.dry_run);
        assert!(!run.fail_fast);
    }

    #[test]
    fn test_config_values_used_without_flags() {
        let config = Config::parse(
            r#"
            base_dir = "from/file"
            atomic = false
            "#,
        )
        .unwrap();

        let run = cli(&["--dry-run", "--fail-fast"]).merge(config).unwrap();
        assert_eq!(run.base_dir, PathBuf::from("from/file"));
        assert_eq!(run.subdirs, vec!["right", "left"]);
        assert_eq!(run.write_mode, WriteMode::InPlace);
        assert!(run.dry_run);
        assert!(run.fail_fast);
    }

    #[test]
    fn test_missing_base_dir() {
        let err = cli(&[]).merge(Config::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseDir));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let err = cli(&["--config", "no/such/spritefix.toml"])
            .run_config()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_default_config_is_optional() {
        let run = cli(&["--base-dir", "sprites"])
            .run_config_with_default(Path::new("no/such/spritefix.toml"))
            .unwrap();
        assert_eq!(run.base_dir, PathBuf::from("sprites"));
        assert_eq!(run.write_mode, WriteMode::Atomic);
    }
}
