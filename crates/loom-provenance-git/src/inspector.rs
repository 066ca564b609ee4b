// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ExecutionError;
use crate::runner::{CommandRunner, GitRunner};

/// Branch name reported for a detached HEAD, or when the lookup fails.
pub const DETACHED_HEAD: &str = "HEAD";

/// Appended to the summary when the working tree has uncommitted changes.
pub const DIRTY_SUFFIX: &str = "-dirty";

/// Whether the working tree matches HEAD.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TreeState {
	Clean,
	Dirty,
}

impl TreeState {
	pub fn as_str(&self) -> &'static str {
		match self {
			TreeState::Clean => "clean",
			TreeState::Dirty => "dirty",
		}
	}
}

impl From<bool> for TreeState {
	fn from(dirty: bool) -> Self {
		if dirty {
			TreeState::Dirty
		} else {
			TreeState::Clean
		}
	}
}

impl fmt::Display for TreeState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Read-only queries against the repository checked out at a directory.
///
/// Nothing is cached: every call runs git again, so results track the
/// repository as it changes underneath.
#[derive(Clone, Debug)]
pub struct RepoInspector<R = CommandRunner> {
	dir: PathBuf,
	runner: R,
}

impl RepoInspector<CommandRunner> {
	/// Inspector using the `git` found on `PATH`.
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self::with_runner(dir, CommandRunner::default())
	}
}

impl<R: GitRunner> RepoInspector<R> {
	pub fn with_runner(dir: impl Into<PathBuf>, runner: R) -> Self {
		Self {
			dir: dir.into(),
			runner,
		}
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn run(&self, args: &[&str]) -> Result<String, ExecutionError> {
		self.runner.run(&self.dir, args)
	}

	/// Returns the abbreviated hash of HEAD.
	pub fn commit(&self) -> Result<String, ExecutionError> {
		self.run(&["rev-parse", "--short", "HEAD"])
	}

	/// Returns true if there are staged, unstaged or untracked changes.
	pub fn is_dirty(&self) -> Result<bool, ExecutionError> {
		let out = self.run(&["status", "--porcelain"])?;
		Ok(!out.is_empty())
	}

	pub fn state(&self) -> Result<TreeState, ExecutionError> {
		self.is_dirty().map(TreeState::from)
	}

	/// Returns the short branch name, or [`DETACHED_HEAD`].
	///
	/// `symbolic-ref -q` exits 1 on a detached HEAD. Any other failure is
	/// reported the same way, so this never errors.
	pub fn branch(&self) -> String {
		match self.run(&["symbolic-ref", "-q", "--short", "HEAD"]) {
			Ok(branch) => branch,
			Err(e) => {
				tracing::debug!(dir = %self.dir.display(), error = %e, "no branch, assuming detached HEAD");
				DETACHED_HEAD.to_string()
			}
		}
	}

	/// Returns the tag at HEAD, or its abbreviated hash, with
	/// [`DIRTY_SUFFIX`] appended when the working tree is dirty.
	///
	/// Only a failure of the final commit lookup is reported. A failed dirty
	/// check counts as clean.
	pub fn summary(&self) -> Result<String, ExecutionError> {
		let id = match self.run(&["describe", "--tags", "--exact-match", "--always"]) {
			Ok(id) if !id.is_empty() => id,
			Ok(_) => self.commit()?,
			Err(e) => {
				tracing::debug!(dir = %self.dir.display(), error = %e, "describe failed, falling back to commit hash");
				self.commit()?
			}
		};

		match self.is_dirty() {
			Ok(true) => Ok(format!("{id}{DIRTY_SUFFIX}")),
			Ok(false) => Ok(id),
			Err(e) => {
				tracing::debug!(dir = %self.dir.display(), error = %e, "dirty check failed, treating as clean");
				Ok(id)
			}
		}
	}

	/// Returns the repository's git directory, resolved against the bound
	/// directory when git reports it relative.
	pub fn git_dir(&self) -> Result<PathBuf, ExecutionError> {
		let out = self.run(&["rev-parse", "--git-dir"])?;
		Ok(self.resolve(out))
	}

	/// Returns the directory holding refs and `packed-refs`. Differs from
	/// [`git_dir`](Self::git_dir) only inside a linked worktree.
	pub fn common_dir(&self) -> Result<PathBuf, ExecutionError> {
		let out = self.run(&["rev-parse", "--git-common-dir"])?;
		Ok(self.resolve(out))
	}

	/// Returns the full ref HEAD points to, e.g. `refs/heads/main`, or
	/// `None` when HEAD is detached.
	pub fn head_ref(&self) -> Result<Option<String>, ExecutionError> {
		let out = self.run(&["rev-parse", "--symbolic-full-name", "HEAD"])?;
		if out.is_empty() || out == DETACHED_HEAD {
			Ok(None)
		} else {
			Ok(Some(out))
		}
	}

	/// Returns tracked files plus untracked files that are not ignored,
	/// across the whole worktree. Paths outside the bound directory come back
	/// as `<dir>/../<path>`.
	pub fn worktree_files(&self) -> Result<Vec<PathBuf>, ExecutionError> {
		let out = self.run(&["ls-files", "-z", "--cached", "--others", "--exclude-standard", ":/"])?;
		let mut files: Vec<PathBuf> = out
			.split('\0')
			.filter(|name| !name.is_empty())
			.map(|name| self.dir.join(name))
			.collect();
		// Unmerged paths are listed once per stage.
		files.dedup();
		Ok(files)
	}

	fn resolve(&self, out: String) -> PathBuf {
		let path = PathBuf::from(out);
		if path.is_absolute() {
			path
		} else {
			self.dir.join(path)
		}
	}
}
