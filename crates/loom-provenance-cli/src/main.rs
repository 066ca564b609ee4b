// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! `loom-provenance`: print the git-derived version of a checkout.

mod config;
mod error;
mod version;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use loom_provenance::{BuildStamp, CommandRunner, ExecutionError, GitRunner, RepoInspector};
use tracing_subscriber::EnvFilter;

use config::{Args, Command, Config};

fn main() -> ExitCode {
	// Logs go to stderr; stdout is reserved for the answer.
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.init();

	let args = Args::parse();

	match run(&args) {
		Ok(output) => {
			print!("{output}");
			ExitCode::SUCCESS
		}
		Err(e) => {
			tracing::error!(error = %failure_message(&e), "command failed");
			ExitCode::FAILURE
		}
	}
}

/// One-line description of a failed run, with a hint when git could not be
/// started at all.
fn failure_message(e: &anyhow::Error) -> String {
	let not_found = e
		.chain()
		.filter_map(|cause| cause.downcast_ref::<ExecutionError>())
		.any(ExecutionError::is_not_found);
	if not_found {
		format!("{e:#} (check --git / LOOM_PROVENANCE_GIT and -C / LOOM_PROVENANCE_DIR)")
	} else {
		format!("{e:#}")
	}
}

fn run(args: &Args) -> anyhow::Result<String> {
	let command = args.command.clone().unwrap_or(Command::Summary);
	if command == Command::Version {
		return Ok(version::format_version_info());
	}

	let config = Config::resolve(args).context("failed to load configuration")?;
	tracing::debug!(
			dir = %config.dir.display(),
			git = %config.git.display(),
			command = ?command,
			"resolved configuration"
	);

	let inspector = RepoInspector::with_runner(&config.dir, CommandRunner::with_program(&config.git));
	Ok(execute(&command, &inspector, &config)?)
}

fn execute<R: GitRunner>(
	command: &Command,
	inspector: &RepoInspector<R>,
	config: &Config,
) -> Result<String, ExecutionError> {
	let line = match command {
		Command::Commit => inspector.commit()?,
		Command::Branch => inspector.branch(),
		Command::State => inspector.state()?.to_string(),
		Command::Summary => inspector.summary()?,
		Command::Stamp(_) => {
			let stamp = BuildStamp::collect(inspector)?;
			return Ok(stamp.render(config.format, &config.env_names));
		}
		Command::Version => return Ok(version::format_version_info()),
	};
	Ok(format!("{line}\n"))
}
