// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use loom_provenance::EnvNames;

fn main() {
	let os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_else(|_| "unknown".to_string());
	let arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_else(|_| "unknown".to_string());
	println!("cargo:rustc-env=LOOM_PLATFORM={os}-{arch}");

	let dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
	if loom_provenance::emit_cargo_directives(&dir).is_err() {
		// Building from a source tarball or without git installed.
		let names = EnvNames::default();
		for name in [names.commit, names.branch, names.state, names.summary] {
			println!("cargo:rustc-env={name}=unknown");
		}
	}
}
