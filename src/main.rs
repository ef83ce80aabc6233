//! CLI for maze validation and solving

use std::{
    env,
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::Context;
use env_logger::Env;
use log::debug;
use maze_solver::cli::{self, CliError, Command, Config, Status};

/// Read maze from file, print verdict or path
fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(status) => status.into(),
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<Status> {
    let config = Config::from_env().context("Failed to read configuration")?;

    let command = match Command::from_args(env::args_os()) {
        Ok(command) => command,
        Err(CliError::Clap(e)) => e.exit(),
        Err(CliError::Usage(e)) => {
            eprintln!("{}", e);
            return Ok(Status::Failure);
        }
    };
    debug!("Running {:?}", command);

    let mut out = BufWriter::new(io::stdout().lock());
    let mut err = io::stderr().lock();
    let status = cli::execute(&command, &config, &mut out, &mut err)?;
    out.flush().context("Failed to write output")?;
    Ok(status)
}
