// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build version stamps for Loom binaries.
//!
//! A [`BuildStamp`] gathers the commit, branch, tree state and summary of a
//! git checkout in one pass and renders them for whatever is consuming them:
//! a human, a JSON reader, a dotenv file, or a cargo build script.
//!
//! ```no_run
//! // build.rs
//! fn main() {
//!     if let Err(e) = loom_provenance::emit_cargo_directives(".") {
//!         println!("cargo:warning=could not stamp build: {e}");
//!     }
//! }
//! ```

pub mod env;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use env::{EnvNames, InvalidPrefix, DEFAULT_PREFIX};
pub use loom_provenance_git::{
	CommandRunner, ExecutionError, GitRunner, RepoInspector, TreeState, DETACHED_HEAD, DIRTY_SUFFIX,
};

/// Provenance of the checkout a binary is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildStamp {
	pub commit: String,
	pub branch: String,
	pub state: TreeState,
	pub summary: String,
	/// Files whose modification can change the stamp. Empty when they could
	/// not be determined, in which case no rerun directives are emitted and
	/// cargo falls back to rerunning on any package change.
	#[serde(skip)]
	pub rerun_paths: Vec<PathBuf>,
}

impl BuildStamp {
	/// Query every field from the repository behind `inspector`.
	///
	/// Fails if the commit, the tree state or the summary cannot be
	/// determined. The branch never fails; missing rerun paths are tolerated.
	pub fn collect<R: GitRunner>(inspector: &RepoInspector<R>) -> Result<Self, ExecutionError> {
		let commit = inspector.commit()?;
		let branch = inspector.branch();
		let state = inspector.state()?;
		let summary = inspector.summary()?;
		let rerun_paths = rerun_paths(inspector).unwrap_or_else(|e| {
			tracing::debug!(dir = %inspector.dir().display(), error = %e, "could not determine rerun paths");
			Vec::new()
		});

		tracing::debug!(
				dir = %inspector.dir().display(),
				commit = %commit,
				branch = %branch,
				state = %state,
				summary = %summary,
				rerun_paths = rerun_paths.len(),
				"collected build stamp"
		);

		Ok(Self {
			commit,
			branch,
			state,
			summary,
			rerun_paths,
		})
	}

	/// Render the stamp in `format`, naming exported variables after `names`.
	pub fn render(&self, format: StampFormat, names: &EnvNames) -> String {
		match format {
			StampFormat::Text => format!(
				"commit:  {}\nbranch:  {}\nstate:   {}\nsummary: {}\n",
				self.commit, self.branch, self.state, self.summary
			),
			StampFormat::Json => {
				let value = serde_json::json!({
					"commit": self.commit,
					"branch": self.branch,
					"state": self.state.as_str(),
					"summary": self.summary,
				});
				format!("{value:#}\n")
			}
			StampFormat::Env => self
				.pairs(names)
				.map(|(name, value)| format!("{name}={value}\n"))
				.collect(),
			StampFormat::Cargo => {
				let mut out: String = self
					.pairs(names)
					.map(|(name, value)| format!("cargo:rustc-env={name}={value}\n"))
					.collect();
				for path in &self.rerun_paths {
					out.push_str(&format!("cargo:rerun-if-changed={}\n", path.display()));
				}
				out
			}
		}
	}

	fn pairs<'a>(&'a self, names: &'a EnvNames) -> impl Iterator<Item = (&'a str, &'a str)> {
		[
			(names.commit.as_str(), self.commit.as_str()),
			(names.branch.as_str(), self.branch.as_str()),
			(names.state.as_str(), self.state.as_str()),
			(names.summary.as_str(), self.summary.as_str()),
		]
		.into_iter()
	}
}

/// Paths whose modification can change a stamp of the checkout behind
/// `inspector`.
///
/// Covers HEAD and the index, the ref HEAD points to, every tag, and the
/// tracked and untracked (not ignored) files under the inspected directory.
/// Once a build script prints any `rerun-if-changed`, cargo watches only
/// those, so the worktree files are what keeps the dirty marker current.
pub fn rerun_paths<R: GitRunner>(inspector: &RepoInspector<R>) -> Result<Vec<PathBuf>, ExecutionError> {
	let git_dir = inspector.git_dir()?;
	let common_dir = inspector.common_dir()?;

	let mut paths = vec![
		git_dir.join("HEAD"),
		git_dir.join("index"),
		common_dir.join("packed-refs"),
		common_dir.join("refs").join("tags"),
	];
	if let Some(head_ref) = inspector.head_ref()? {
		// A packed ref has no loose file until its next update; watch the
		// directory it will be written to instead.
		let path = common_dir.join(&head_ref);
		match path.parent() {
			Some(parent) if !path.exists() => paths.push(parent.to_path_buf()),
			_ => paths.push(path),
		}
	}
	// cargo reruns on every build for a watched path that does not exist.
	paths.retain(|p| p.exists());

	// Deleted tracked files stay listed, so the build reruns until they are
	// restored or the deletion is committed.
	paths.extend(inspector.worktree_files()?);
	Ok(paths)
}

/// Output format for a rendered stamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StampFormat {
	/// Aligned `key: value` lines.
	#[default]
	Text,
	/// A JSON object.
	Json,
	/// `NAME=value` lines.
	Env,
	/// `cargo:rustc-env` and `cargo:rerun-if-changed` directives.
	Cargo,
}

/// Stamp the crate being built from the checkout at `dir`.
///
/// Intended for `build.rs`: prints `cargo:rustc-env` directives for the
/// default [`EnvNames`] plus rerun triggers from [`rerun_paths`], and
/// returns the stamp for further use.
pub fn emit_cargo_directives(dir: impl AsRef<Path>) -> Result<BuildStamp, ExecutionError> {
	let inspector = RepoInspector::new(dir.as_ref());
	let stamp = BuildStamp::collect(&inspector)?;
	print!("{}", stamp.render(StampFormat::Cargo, &EnvNames::default()));
	Ok(stamp)
}
