mod cli;
mod config;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let run_config = match cli.run_config() {
        Ok(run_config) => run_config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Fixing sprites under {} ({:?}, dry run: {})",
        run_config.base_dir.display(),
        run_config.write_mode,
        run_config.dry_run
    );

    let mut stdout = std::io::stdout().lock();
    match sprite_trim::run(&run_config, &mut stdout) {
        Ok(report) if report.has_failures() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
