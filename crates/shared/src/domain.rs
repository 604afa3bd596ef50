use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a programming language as served by the translation
/// engine (`c`, `c#`, `java`, ...).
///
/// Kept byte-for-byte: the engine keys its models on the exact string, so
/// only user-typed input is matched loosely (see [`LanguageId::matches_input`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive comparison against text typed by a user.
    pub fn matches_input(&self, input: &str) -> bool {
        self.0.eq_ignore_ascii_case(input.trim())
    }

    /// Uppercase form used in status text and selector labels.
    pub fn label(&self) -> String {
        self.0.to_uppercase()
    }
}

impl From<String> for LanguageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for LanguageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<LanguageId> for String {
    fn from(value: LanguageId) -> Self {
        value.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One supported translation direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: LanguageId,
    pub target: LanguageId,
}

impl Edge {
    pub fn new(source: impl Into<LanguageId>, target: impl Into<LanguageId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source.label(), self.target.label())
    }
}
