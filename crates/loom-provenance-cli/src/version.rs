// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build information for this binary, stamped by its own build script.

/// Platform string in `{os}-{arch}` format, e.g. "linux-x86_64".
pub const PLATFORM: &str = env!("LOOM_PLATFORM");

#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
	pub version: &'static str,
	pub git_commit: &'static str,
	pub git_branch: &'static str,
	pub git_summary: &'static str,
	pub platform: &'static str,
}

impl BuildInfo {
	pub const fn current() -> Self {
		Self {
			version: env!("CARGO_PKG_VERSION"),
			git_commit: env!("LOOM_GIT_COMMIT"),
			git_branch: env!("LOOM_GIT_BRANCH"),
			git_summary: env!("LOOM_GIT_SUMMARY"),
			platform: PLATFORM,
		}
	}
}

/// Format version info for display.
pub fn format_version_info() -> String {
	let info = BuildInfo::current();

	format!(
		"loom-provenance {}\n\
         Git:      {} ({} on {})\n\
         Platform: {}\n",
		info.version, info.git_summary, info.git_commit, info.git_branch, info.platform,
	)
}
