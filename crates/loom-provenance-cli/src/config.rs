// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Command-line arguments and layered configuration.
//!
//! Precedence, highest first: flags, environment variables, the TOML config
//! file, built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use loom_provenance::{EnvNames, StampFormat, DEFAULT_PREFIX};
use serde::Deserialize;

use crate::error::ConfigError;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "provenance.toml";

/// Loom provenance - derive a build version from git
#[derive(Parser, Debug)]
#[command(name = "loom-provenance", version)]
pub struct Args {
	/// Repository working directory
	#[arg(short = 'C', long, env = "LOOM_PROVENANCE_DIR", default_value = ".")]
	pub dir: PathBuf,

	/// Git executable (defaults to `git` on PATH)
	#[arg(long, env = "LOOM_PROVENANCE_GIT")]
	pub git: Option<PathBuf>,

	/// Config file (defaults to provenance.toml in the working directory)
	#[arg(long, env = "LOOM_PROVENANCE_CONFIG")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Print the abbreviated HEAD commit
	Commit,
	/// Print the current branch, or HEAD when detached
	Branch,
	/// Print clean or dirty
	State,
	/// Print the tag at HEAD or the commit, with -dirty when modified
	Summary,
	/// Print every field in the chosen format
	Stamp(StampArgs),
	/// Show version information for this tool
	Version,
}

#[derive(ClapArgs, Debug, Clone, Default, PartialEq, Eq)]
pub struct StampArgs {
	/// Output format
	#[arg(long, value_enum)]
	pub format: Option<StampFormat>,

	/// Prefix for exported variable names (env and cargo formats)
	#[arg(long)]
	pub env_prefix: Option<String>,
}

/// Contents of the TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
	pub git: Option<PathBuf>,
	pub format: Option<StampFormat>,
	pub env_prefix: Option<String>,
}

impl FileConfig {
	pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
		toml::from_str(contents).map_err(|source| ConfigError::TomlParse {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Read `path`. A missing file is only an error when `required`.
	pub fn load(path: &Path, required: bool) -> Result<Option<Self>, ConfigError> {
		match fs::read_to_string(path) {
			Ok(contents) => {
				tracing::debug!(path = %path.display(), "loaded config file");
				Self::parse(path, &contents).map(Some)
			}
			Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
				tracing::trace!(path = %path.display(), "no config file");
				Ok(None)
			}
			Err(source) => Err(ConfigError::Io {
				path: path.to_path_buf(),
				source,
			}),
		}
	}
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub dir: PathBuf,
	pub git: PathBuf,
	pub format: StampFormat,
	pub env_names: EnvNames,
}

impl Config {
	/// Merge arguments over the config file over defaults.
	pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
		let file = match &args.config {
			Some(path) => FileConfig::load(path, true)?,
			None => FileConfig::load(&args.dir.join(DEFAULT_CONFIG_FILE), false)?,
		}
		.unwrap_or_default();

		let stamp = match &args.command {
			Some(Command::Stamp(stamp)) => stamp.clone(),
			_ => StampArgs::default(),
		};

		Self::merge(args, &stamp, file)
	}

	fn merge(args: &Args, stamp: &StampArgs, file: FileConfig) -> Result<Self, ConfigError> {
		let git = args
			.git
			.clone()
			.or(file.git)
			.unwrap_or_else(|| PathBuf::from("git"));
		if git.as_os_str().is_empty() {
			return Err(ConfigError::validation("git executable must not be empty"));
		}

		let format = stamp.format.or(file.format).unwrap_or_default();

		let prefix = stamp
			.env_prefix
			.clone()
			.or(file.env_prefix)
			.unwrap_or_else(|| DEFAULT_PREFIX.to_string());
		let env_names =
			EnvNames::with_prefix(&prefix).map_err(|e| ConfigError::validation(e.to_string()))?;

		Ok(Self {
			dir: args.dir.clone(),
			git,
			format,
			env_names,
		})
	}
}
