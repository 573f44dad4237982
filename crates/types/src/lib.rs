//! Shared boundary types for clinbridge.
//!
//! Source tables identify people with an identifier owned by the originating system.
//! Every FHIR id this workspace derives (`pat-<id>`, `cond-<id>`) embeds that value, so
//! it is validated once here instead of at each call site.

use std::str::FromStr;

/// Errors that can occur when validating a source identifier.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input was empty or contained only whitespace
    #[error("source identifier cannot be empty")]
    Empty,
    /// The input is longer than a derived FHIR id allows
    #[error("source identifier is {len} characters, maximum is {max}")]
    TooLong { len: usize, max: usize },
    /// The input contains a character FHIR ids do not allow
    #[error("source identifier contains invalid character {0:?}")]
    InvalidChar(char),
}

/// Identifier of a person in the originating data system.
///
/// The value is trimmed on construction and restricted to the FHIR id alphabet
/// (`A-Z a-z 0-9 - .`). Its length leaves room for the longest prefix used when
/// deriving resource ids, keeping the result within the 64 character FHIR limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(String);

impl SourceId {
    /// Longest accepted identifier.
    pub const MAX_LEN: usize = 59;

    /// Creates a new `SourceId` from the given input.
    ///
    /// # Errors
    ///
    /// Returns [`IdError`] if the trimmed input is empty, longer than
    /// [`SourceId::MAX_LEN`], or contains characters outside the FHIR id alphabet.
    pub fn new(input: impl AsRef<str>) -> Result<Self, IdError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }

        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(IdError::TooLong {
                len,
                max: Self::MAX_LEN,
            });
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
        {
            return Err(IdError::InvalidChar(bad));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SourceId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SourceId::new(&s).map_err(serde::de::Error::custom)
    }
}
