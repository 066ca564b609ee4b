// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, trace, warn};

use crate::error::ExecutionError;

/// Trait abstracting git process execution for testability.
pub trait GitRunner: Send + Sync {
	/// Run git with `args` in `dir` and return its trimmed standard output.
	///
	/// Fails when the process cannot be launched or exits non-zero; the
	/// error carries whatever was written to standard error.
	fn run(&self, dir: &Path, args: &[&str]) -> Result<String, ExecutionError>;
}

impl<T: GitRunner + ?Sized> GitRunner for &T {
	fn run(&self, dir: &Path, args: &[&str]) -> Result<String, ExecutionError> {
		(**self).run(dir, args)
	}
}

impl<T: GitRunner + ?Sized> GitRunner for Box<T> {
	fn run(&self, dir: &Path, args: &[&str]) -> Result<String, ExecutionError> {
		(**self).run(dir, args)
	}
}

/// Git runner that spawns the git CLI.
#[derive(Clone, Debug)]
pub struct CommandRunner {
	program: PathBuf,
}

impl CommandRunner {
	pub fn new() -> Self {
		Self::with_program("git")
	}

	/// Use a specific executable instead of `git` from `PATH`.
	pub fn with_program(program: impl Into<PathBuf>) -> Self {
		Self {
			program: program.into(),
		}
	}

	fn program_name(&self) -> String {
		self.program
			.file_name()
			.unwrap_or_else(|| OsStr::new("git"))
			.to_string_lossy()
			.into_owned()
	}
}

impl Default for CommandRunner {
	fn default() -> Self {
		Self::new()
	}
}

impl GitRunner for CommandRunner {
	fn run(&self, dir: &Path, args: &[&str]) -> Result<String, ExecutionError> {
		let mut cmd = Command::new(&self.program);
		cmd.args(args).current_dir(dir);

		trace!(
				dir = %dir.display(),
				cmd = %format!("{} {}", self.program.display(), args.join(" ")),
				"running git command"
		);

		let output = cmd.output().map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				warn!(
						program = %self.program.display(),
						dir = %dir.display(),
						"git executable or working directory not found"
				);
			}
			ExecutionError::launch(self.program_name(), args, e)
		})?;

		let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

		if output.status.success() {
			Ok(stdout)
		} else {
			let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
			debug!(
					args = ?args,
					status = ?output.status.code(),
					stderr = %stderr,
					"git command returned non-zero"
			);
			Err(ExecutionError::exit(
				self.program_name(),
				args,
				output.status.code(),
				stderr,
			))
		}
	}
}
