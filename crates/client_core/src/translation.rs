//! Request/response lifecycle of a single translation.

use shared::{
    error::TranslatorError,
    protocol::{TranslateRequest, TranslateResponse},
};
use tracing::{info, warn};

use crate::{catalog::PairCatalog, selection::Selection, TranslationEngine};

pub const EMPTY_INPUT_MESSAGE: &str = "please enter code to translate";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// At rest. Carries the local rejection that put the controller here, if any.
    Idle { rejection: Option<TranslatorError> },
    InFlight,
    /// Non-empty `warnings` is reported at warning severity; the text is
    /// delivered either way.
    Success { text: String, warnings: Vec<String> },
    Error { reason: String },
}

impl Default for TranslationOutcome {
    fn default() -> Self {
        Self::Idle { rejection: None }
    }
}

impl TranslationOutcome {
    pub fn has_warnings(&self) -> bool {
        matches!(self, Self::Success { warnings, .. } if !warnings.is_empty())
    }
}

/// Drives `Idle -> InFlight -> {Success | Error}`.
///
/// The controller does not guard against overlapping submissions; the caller
/// disables submission while [`is_in_flight`](Self::is_in_flight) is true. If
/// that guard is bypassed the earlier request is not cancelled, and whichever
/// response resolves last overwrites the outcome.
#[derive(Debug, Default)]
pub struct TranslationController {
    outcome: TranslationOutcome,
    result: String,
}

impl TranslationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> &TranslationOutcome {
        &self.outcome
    }

    /// Text shown in the result slot: the translation, or an error annotation.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.outcome, TranslationOutcome::InFlight)
    }

    /// Validates the input without touching the network and, when it passes,
    /// enters `InFlight` and returns the request to issue.
    pub fn begin(
        &mut self,
        catalog: &PairCatalog,
        selection: &Selection,
        text: &str,
    ) -> Result<TranslateRequest, TranslatorError> {
        if text.trim().is_empty() {
            return Err(self.reject(TranslatorError::validation(EMPTY_INPUT_MESSAGE)));
        }

        let edge = match selection.edge() {
            Some(edge) if catalog.contains(&edge) => edge,
            Some(edge) => return Err(self.reject(TranslatorError::edge_not_supported(edge))),
            None => {
                return Err(self.reject(TranslatorError::validation(
                    "select a source and target language",
                )))
            }
        };

        self.result.clear();
        self.outcome = TranslationOutcome::InFlight;
        info!(%edge, bytes = text.len(), "issuing translation request");
        Ok(TranslateRequest::new(text, &edge))
    }

    /// Applies the engine's answer. Not fenced: a stale response still wins.
    pub fn resolve(
        &mut self,
        response: Result<TranslateResponse, TranslatorError>,
    ) -> &TranslationOutcome {
        match response {
            Ok(TranslateResponse {
                translation,
                warnings,
            }) => {
                if !warnings.is_empty() {
                    warn!(count = warnings.len(), "translation completed with warnings");
                }
                self.result = translation.clone();
                self.outcome = TranslationOutcome::Success {
                    text: translation,
                    warnings,
                };
            }
            Err(err) => {
                warn!(error = %err, "translation failed");
                let reason = err.to_string();
                self.result = format!("Error: {reason}");
                self.outcome = TranslationOutcome::Error { reason };
            }
        }
        &self.outcome
    }

    /// Runs one full cycle against `engine`: validate, issue once, resolve.
    pub async fn submit<E>(
        &mut self,
        engine: &E,
        catalog: &PairCatalog,
        selection: &Selection,
        text: &str,
    ) -> &TranslationOutcome
    where
        E: TranslationEngine + ?Sized,
    {
        let request = match self.begin(catalog, selection, text) {
            Ok(request) => request,
            Err(_) => return &self.outcome,
        };
        let response = engine.translate(&request).await;
        self.resolve(response)
    }

    pub fn clear(&mut self) {
        self.result.clear();
        self.outcome = TranslationOutcome::default();
    }

    fn reject(&mut self, err: TranslatorError) -> TranslatorError {
        self.outcome = TranslationOutcome::Idle {
            rejection: Some(err.clone()),
        };
        err
    }
}

#[cfg(test)]
#[path = "tests/translation_tests.rs"]
mod tests;
