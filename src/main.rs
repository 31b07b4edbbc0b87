use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use loss_distance::app::run_viewer;
use loss_distance::cli::Args;
use loss_distance::{analyze, write_outputs};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.into_config();
    let analysis = analyze(&config)?;
    write_outputs(&config, &analysis)?;

    if config.output_plot.is_none() {
        run_viewer(analysis, config.y_max)?;
    }
    Ok(())
}
