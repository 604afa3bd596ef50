//! Client-side core of the CodeMorph translator: the pair catalog, the
//! selection and translation state machines, status reporting, and the HTTP
//! seam to the remote translation engine.

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    error::TranslatorError,
    protocol::{SupportedPairsResponse, TranslateRequest, TranslateResponse},
};
use tracing::{debug, warn};

pub mod catalog;
pub mod selection;
pub mod status;
pub mod translation;

pub use catalog::{fetch_catalog, PairCatalog};
pub use selection::{
    default_preferred_edge, PairSelectionController, Selection, SelectionState, SwapAdvisory,
    DEFAULT_PREFERRED_PAIR,
};
pub use status::{Severity, StatusMessage};
pub use translation::{TranslationController, TranslationOutcome};

/// The remote translation engine, seen as two request/response calls.
///
/// Each call resolves exactly once. No timeout, retry, or cancellation is
/// applied on top of what the transport does.
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    async fn supported_pairs(&self) -> Result<SupportedPairsResponse, TranslatorError>;
    async fn translate(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, TranslatorError>;
}

pub struct HttpTranslationEngine {
    http: Client,
    base_url: String,
}

impl HttpTranslationEngine {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_success_body(response: Response) -> Result<Vec<u8>, TranslatorError> {
        let status = response.status();
        if !status.is_success() {
            let message = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string());
            warn!(status = status.as_u16(), %message, "engine returned error status");
            return Err(TranslatorError::network(Some(status.as_u16()), message));
        }
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl TranslationEngine for HttpTranslationEngine {
    async fn supported_pairs(&self) -> Result<SupportedPairsResponse, TranslatorError> {
        let url = format!("{}/supported_pairs", self.base_url);
        debug!(%url, "fetching supported pairs");
        let response = self.http.get(url).send().await.map_err(transport_error)?;
        let body = Self::read_success_body(response).await?;
        SupportedPairsResponse::from_slice(&body)
    }

    async fn translate(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, TranslatorError> {
        let url = format!("{}/translate", self.base_url);
        debug!(
            %url,
            source = %request.source_lang,
            target = %request.target_lang,
            "posting translation request"
        );
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        let body = Self::read_success_body(response).await?;
        TranslateResponse::from_slice(&body)
    }
}

fn transport_error(err: reqwest::Error) -> TranslatorError {
    warn!(error = %err, "engine transport failure");
    TranslatorError::network(err.status().map(|status| status.as_u16()), err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
