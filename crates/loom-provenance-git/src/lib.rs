// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Git working-tree inspection for build provenance.
//!
//! [`RepoInspector`] shells out to `git` in a fixed directory to answer four
//! questions: the abbreviated HEAD commit, the current branch, whether the
//! tree is clean, and a tag-or-hash summary suitable as a version string.
//! Process execution sits behind [`GitRunner`] so it can be replaced in tests.

mod error;
mod inspector;
mod runner;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::{ExecutionError, Failure};
pub use inspector::{RepoInspector, TreeState, DETACHED_HEAD, DIRTY_SUFFIX};
pub use runner::{CommandRunner, GitRunner};
