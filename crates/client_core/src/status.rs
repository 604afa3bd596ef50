//! Pure mapping from controller outcomes to user-facing status lines.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared::error::{ErrorKind, TranslatorError};

use crate::{catalog::PairCatalog, selection::SwapAdvisory, translation::TranslationOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::info("")
    }
}

pub fn report(outcome: &TranslationOutcome) -> StatusMessage {
    match outcome {
        TranslationOutcome::Idle { rejection: None } => StatusMessage::default(),
        TranslationOutcome::Idle {
            rejection: Some(err),
        } => report_rejection(err),
        TranslationOutcome::InFlight => StatusMessage::info("Translating code..."),
        TranslationOutcome::Success { warnings, .. } if warnings.is_empty() => {
            StatusMessage::success("Translation successful!")
        }
        TranslationOutcome::Success { warnings, .. } => StatusMessage::warning(format!(
            "Translation complete with warnings: {}",
            warnings.join("; ")
        )),
        TranslationOutcome::Error { reason } => {
            StatusMessage::error(format!("Translation failed: {reason}"))
        }
    }
}

/// Warning for an operation refused before reaching the engine.
pub fn report_rejection(err: &TranslatorError) -> StatusMessage {
    StatusMessage::warning(capitalize_sentence(&err.to_string()))
}

pub fn report_advisory(advisory: &SwapAdvisory) -> StatusMessage {
    StatusMessage::warning(advisory.to_string())
}

pub fn report_catalog(catalog: &PairCatalog, load_error: Option<&TranslatorError>) -> StatusMessage {
    match load_error {
        Some(err) if err.kind() == ErrorKind::Format => StatusMessage::error(format!(
            "No language pairs available: invalid API response format ({err})"
        )),
        Some(err) => StatusMessage::error(format!(
            "No language pairs available: {err}. Please ensure the translation engine is running."
        )),
        None if catalog.is_empty() => StatusMessage::warning(
            "No language pairs available from API. Please ensure backend is running and models are present.",
        ),
        None => StatusMessage::info(format!("{} language pairs available", catalog.len())),
    }
}

fn capitalize_sentence(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut sentence: String = first.to_uppercase().chain(chars).collect();
    if !sentence.ends_with(['.', '!', '?']) {
        sentence.push('.');
    }
    sentence
}

#[cfg(test)]
#[path = "tests/status_tests.rs"]
mod tests;
