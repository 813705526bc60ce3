//! Validated artifact file-name newtype.
//!
//! An [`ArtifactName`] is the bare file name an artifact is stored under
//! inside the parameter directory. Validation rejects anything that could
//! resolve outside that directory.

use super::error::{Result, SpecError};
use serde::Deserialize;
use std::fmt;

/// A validated artifact file name.
///
/// Names must be non-empty, contain no path separators or NUL bytes, and
/// must not be the `.` or `..` directory references.
///
/// # Examples
///
/// ```
/// use paramsync::artifact::name::ArtifactName;
///
/// let name: ArtifactName = "sprout-proving.key".try_into().unwrap();
/// assert_eq!(name.as_str(), "sprout-proving.key");
/// assert!(ArtifactName::try_from("../escape").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for ArtifactName {
    type Error = SpecError;

    fn try_from(value: &str) -> Result<Self> {
        validate_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for ArtifactName {
    type Error = SpecError;

    fn try_from(value: String) -> Result<Self> {
        validate_name(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for ArtifactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a plain file name confined to one directory.
fn validate_name(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SpecError::InvalidName {
            value: value.to_owned(),
            reason: "name is empty".to_owned(),
        });
    }
    if value == "." || value == ".." {
        return Err(SpecError::InvalidName {
            value: value.to_owned(),
            reason: "name is a directory reference".to_owned(),
        });
    }
    if let Some(bad) = value.chars().find(|c| matches!(c, '/' | '\\' | '\0')) {
        return Err(SpecError::InvalidName {
            value: value.to_owned(),
            reason: format!("forbidden character {bad:?}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_plain_file_name() {
        let name = ArtifactName::try_from("sprout-groth16.params");
        assert!(name.is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::current_dir(".")]
    #[case::parent_dir("..")]
    #[case::forward_slash("keys/sprout.key")]
    #[case::back_slash("keys\\sprout.key")]
    #[case::traversal("../sprout.key")]
    #[case::nul("sprout\0.key")]
    fn rejects_unsafe_names(#[case] value: &str) {
        let result = ArtifactName::try_from(value);
        assert!(result.is_err(), "expected rejection for {value:?}");
    }

    #[test]
    fn display_matches_input() {
        let name = ArtifactName::try_from("a.bin").expect("known good");
        assert_eq!(format!("{name}"), "a.bin");
    }
}
