// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Git repository fixtures and a scripted [`GitRunner`] for tests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

use crate::error::ExecutionError;
use crate::runner::GitRunner;

pub fn git(dir: &Path, args: &[&str]) -> String {
	let output = Command::new("git")
		.args(args)
		.current_dir(dir)
		.output()
		.expect("git failed to start");
	assert!(
		output.status.success(),
		"git {} failed: {}",
		args.join(" "),
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn init_git_repo(dir: &Path) {
	git(dir, &["init", "-q"]);
	git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
	git(dir, &["config", "user.email", "test@test.com"]);
	git(dir, &["config", "user.name", "Test"]);
	git(dir, &["config", "commit.gpgsign", "false"]);
	git(dir, &["config", "tag.gpgsign", "false"]);
}

pub fn create_initial_commit(dir: &Path) {
	fs::write(dir.join("README.md"), "# Test").expect("write failed");
	git(dir, &["add", "."]);
	git(dir, &["commit", "-q", "-m", "Initial commit"]);
}

/// Scripted runner keyed by the space-joined argument list.
///
/// Unscripted invocations fail with exit status 1.
#[derive(Default)]
pub struct FakeRunner {
	replies: HashMap<String, Result<String, (i32, String)>>,
	calls: Mutex<Vec<String>>,
}

impl FakeRunner {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn ok(mut self, args: &str, stdout: &str) -> Self {
		self.replies.insert(args.to_string(), Ok(stdout.to_string()));
		self
	}

	pub fn fail(mut self, args: &str, code: i32, stderr: &str) -> Self {
		self.replies
			.insert(args.to_string(), Err((code, stderr.to_string())));
		self
	}

	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().unwrap().clone()
	}
}

impl GitRunner for FakeRunner {
	fn run(&self, _dir: &Path, args: &[&str]) -> Result<String, ExecutionError> {
		let key = args.join(" ");
		self.calls.lock().unwrap().push(key.clone());
		match self.replies.get(&key) {
			Some(Ok(stdout)) => Ok(stdout.trim().to_string()),
			Some(Err((code, stderr))) => Err(ExecutionError::exit("git", args, Some(*code), stderr.clone())),
			None => Err(ExecutionError::exit("git", args, Some(1), "unscripted")),
		}
	}
}
