// LogToYaml - GPL-3.0-or-later
// This file is part of LogToYaml.
//
// Copyright (C) 2025 Daniel Freiermuth
//
// LogToYaml is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// LogToYaml is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with LogToYaml.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::Context;
use clap::Parser;
use log_to_yaml::{ConfigFile, LogToYaml};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "log-to-yaml")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
#[command(about = "Fold newly appended log records into a YAML record store", long_about = None)]
struct Args {
    /// Path to the log file to convert
    #[arg(value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// YAML config file (defaults to the user config directory)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Field separator character
    #[arg(short, long, allow_hyphen_values = true)]
    separator: Option<char>,

    /// Expected level column, only used as a sanity check
    #[arg(long)]
    verifier: Option<usize>,

    /// Label for diagnostic output
    #[arg(long)]
    name: Option<String>,

    /// Where to keep the state instead of next to the log
    #[arg(long, value_name = "STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Parse and report without writing the state file
    #[arg(long)]
    dry_run: bool,

    /// Debug-level diagnostics
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            name: self.name.clone(),
            log_file: self.log_file.clone(),
            separator: self.separator,
            verifier: self.verifier,
            state_file: self.state_file.clone(),
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let base = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::load_default()?,
    };
    let config = base
        .overlay(args.overrides())
        .resolve()
        .context("invalid configuration")?;

    tracing::info!("Converting {}", config.log_file.display());

    let report = LogToYaml::new(config)
        .dry_run(args.dry_run)
        .convert()
        .context("conversion failed")?;

    println!("{}: {report}", report.state_path.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = log_to_yaml::logging::init(args.verbose) {
        eprintln!("failed to initialize logging: {e}");
    }

    tracing::debug!(
        "log-to-yaml starting up (version {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
