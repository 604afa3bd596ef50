use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    domain::{Edge, LanguageId},
    error::TranslatorError,
};

/// A single entry of `GET /supported_pairs`.
///
/// The engine serves `{ "source": .., "target": .. }` objects; the
/// `[source, target]` tuple form is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PairRecord {
    Object {
        source: LanguageId,
        target: LanguageId,
    },
    Tuple(LanguageId, LanguageId),
}

impl From<PairRecord> for Edge {
    fn from(value: PairRecord) -> Self {
        match value {
            PairRecord::Object { source, target } | PairRecord::Tuple(source, target) => {
                Edge { source, target }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedPairsResponse {
    pub pairs: Vec<PairRecord>,
}

impl SupportedPairsResponse {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TranslatorError> {
        serde_json::from_slice(bytes)
            .map_err(|err| TranslatorError::format(format!("supported pairs payload: {err}")))
    }

    pub fn into_edges(self) -> impl Iterator<Item = Edge> {
        self.pairs.into_iter().map(Edge::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub source_code: String,
    pub source_lang: LanguageId,
    pub target_lang: LanguageId,
}

impl TranslateRequest {
    pub fn new(source_code: impl Into<String>, edge: &Edge) -> Self {
        Self {
            source_code: source_code.into(),
            source_lang: edge.source.clone(),
            target_lang: edge.target.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub warnings: Vec<String>,
}

impl TranslateResponse {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TranslatorError> {
        serde_json::from_slice(bytes)
            .map_err(|err| TranslatorError::format(format!("translate payload: {err}")))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
