// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error type for git invocations.

/// Why a git invocation failed.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
	/// The process could not be started (missing executable, bad working
	/// directory, permissions).
	#[error("failed to launch: {0}")]
	Launch(#[source] std::io::Error),

	/// The process ran and exited unsuccessfully. `None` when it was
	/// terminated by a signal.
	#[error("exited with {}", exit_status(.code))]
	Exit { code: Option<i32> },
}

fn exit_status(code: &Option<i32>) -> String {
	match code {
		Some(code) => format!("status {code}"),
		None => "signal".to_string(),
	}
}

/// A failed git invocation, with the captured standard error.
#[derive(Debug, thiserror::Error)]
#[error("{}: {failure}{}", command_line(.program, .args), stderr_suffix(.stderr))]
pub struct ExecutionError {
	pub program: String,
	pub args: Vec<String>,
	#[source]
	pub failure: Failure,
	pub stderr: String,
}

impl ExecutionError {
	pub fn new(program: impl Into<String>, args: &[&str], failure: Failure, stderr: impl Into<String>) -> Self {
		Self {
			program: program.into(),
			args: args.iter().map(|s| s.to_string()).collect(),
			failure,
			stderr: stderr.into(),
		}
	}

	/// Failure to spawn the process at all.
	pub fn launch(program: impl Into<String>, args: &[&str], source: std::io::Error) -> Self {
		Self::new(program, args, Failure::Launch(source), String::new())
	}

	/// Non-zero exit with captured stderr.
	pub fn exit(program: impl Into<String>, args: &[&str], code: Option<i32>, stderr: impl Into<String>) -> Self {
		Self::new(program, args, Failure::Exit { code }, stderr)
	}

	/// True when the executable or the working directory could not be found.
	pub fn is_not_found(&self) -> bool {
		matches!(&self.failure, Failure::Launch(e) if e.kind() == std::io::ErrorKind::NotFound)
	}
}

// The invocation as it would be typed in a shell.
fn command_line(program: &str, args: &[String]) -> String {
	if args.is_empty() {
		program.to_string()
	} else {
		format!("{} {}", program, args.join(" "))
	}
}

// Multi-line stderr is folded so the diagnostic stays on one line.
fn stderr_suffix(stderr: &str) -> String {
	let stderr = stderr.trim();
	if stderr.is_empty() {
		String::new()
	} else {
		format!(": {}", stderr.lines().map(str::trim).collect::<Vec<_>>().join(" "))
	}
}
