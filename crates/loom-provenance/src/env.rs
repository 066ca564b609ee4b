// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Environment variable names used when exporting a stamp.

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "LOOM_GIT";

/// The prefix was empty or not usable as an environment variable name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid environment variable prefix '{0}': expected [A-Za-z0-9_]+ not starting with a digit")]
pub struct InvalidPrefix(pub String);

/// Variable names for each stamp field, e.g. `LOOM_GIT_COMMIT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvNames {
	pub commit: String,
	pub branch: String,
	pub state: String,
	pub summary: String,
}

impl EnvNames {
	pub fn with_prefix(prefix: &str) -> Result<Self, InvalidPrefix> {
		let trimmed = prefix.trim_end_matches('_');
		let valid = !trimmed.is_empty()
			&& !prefix.starts_with(|c: char| c.is_ascii_digit())
			&& prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
		if !valid {
			return Err(InvalidPrefix(prefix.to_string()));
		}

		let prefix = trimmed;
		Ok(Self {
			commit: format!("{prefix}_COMMIT"),
			branch: format!("{prefix}_BRANCH"),
			state: format!("{prefix}_STATE"),
			summary: format!("{prefix}_SUMMARY"),
		})
	}
}

impl Default for EnvNames {
	fn default() -> Self {
		Self {
			commit: format!("{DEFAULT_PREFIX}_COMMIT"),
			branch: format!("{DEFAULT_PREFIX}_BRANCH"),
			state: format!("{DEFAULT_PREFIX}_STATE"),
			summary: format!("{DEFAULT_PREFIX}_SUMMARY"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn default_uses_loom_git_prefix() {
		let names = EnvNames::default();
		assert_eq!(names.commit, "LOOM_GIT_COMMIT");
		assert_eq!(names.branch, "LOOM_GIT_BRANCH");
		assert_eq!(names.state, "LOOM_GIT_STATE");
		assert_eq!(names.summary, "LOOM_GIT_SUMMARY");
		assert_eq!(EnvNames::with_prefix(DEFAULT_PREFIX).unwrap(), names);
	}

	#[test]
	fn custom_prefix() {
		let names = EnvNames::with_prefix("APP").unwrap();
		assert_eq!(names.commit, "APP_COMMIT");
		assert_eq!(names.branch, "APP_BRANCH");
		assert_eq!(names.state, "APP_STATE");
		assert_eq!(names.summary, "APP_SUMMARY");
	}

	#[test]
	fn trailing_underscore_is_not_doubled() {
		let names = EnvNames::with_prefix("APP_").unwrap();
		assert_eq!(names.commit, "APP_COMMIT");
	}

	/// A prefix made only of underscores would yield names like `_COMMIT`.
	#[test]
	fn underscore_only_prefix_is_rejected() {
		assert!(EnvNames::with_prefix("_").is_err());
		assert!(EnvNames::with_prefix("__").is_err());
		assert_eq!(EnvNames::with_prefix("A_").unwrap().commit, "A_COMMIT");
	}

	#[test]
	fn rejects_unusable_prefixes() {
		for bad in ["", "_", "___", "1APP", "APP-GIT", "APP GIT", "APP=X"] {
			assert_eq!(
				EnvNames::with_prefix(bad),
				Err(InvalidPrefix(bad.to_string())),
				"prefix {bad:?} should be rejected"
			);
		}
	}

	// Property: every derived name starts with the prefix and is a valid
	// variable name.
	proptest! {
			#[test]
			fn prop_names_are_prefixed(prefix in "[A-Z][A-Z0-9]{0,10}") {
					let names = EnvNames::with_prefix(&prefix).unwrap();
					let expected = format!("{prefix}_");
					for name in [&names.commit, &names.branch, &names.state, &names.summary] {
							prop_assert!(name.starts_with(&expected));
							prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
					}
			}
	}
}
