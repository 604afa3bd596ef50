use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Edge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Format,
    Network,
    EdgeNotSupported,
}

/// Every failure the client can observe, local or remote.
///
/// `Validation` and `EdgeNotSupported` are raised before any request leaves
/// the process. `Format` covers payloads that violate the engine contract and
/// `Network` covers non-2xx statuses as well as transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslatorError {
    #[error("{0}")]
    Validation(String),
    #[error("malformed response: {0}")]
    Format(String),
    #[error("API error: {message}")]
    Network {
        status: Option<u16>,
        message: String,
    },
    #[error(
        "{} to {} is not a supported language pair",
        .0.source.label(),
        .0.target.label()
    )]
    EdgeNotSupported(Edge),
}

impl TranslatorError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Network {
            status,
            message: message.into(),
        }
    }

    pub fn edge_not_supported(edge: Edge) -> Self {
        Self::EdgeNotSupported(edge)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Format(_) => ErrorKind::Format,
            Self::Network { .. } => ErrorKind::Network,
            Self::EdgeNotSupported(_) => ErrorKind::EdgeNotSupported,
        }
    }
}
