//! Read-only index of the language pairs the engine supports.

use std::collections::HashSet;

use shared::{
    domain::{Edge, LanguageId},
    error::TranslatorError,
    protocol::SupportedPairsResponse,
};
use tracing::{debug, info};

use crate::TranslationEngine;

/// Deduplicated supported edges in arrival order.
///
/// Built once and never mutated afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairCatalog {
    edges: Vec<Edge>,
    index: HashSet<Edge>,
}

impl PairCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut catalog = Self::default();
        for edge in edges {
            if catalog.index.insert(edge.clone()) {
                catalog.edges.push(edge);
            } else {
                debug!(%edge, "dropping duplicate language pair");
            }
        }
        catalog
    }

    pub fn from_response(response: SupportedPairsResponse) -> Self {
        Self::load(response.into_edges())
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, TranslatorError> {
        SupportedPairsResponse::from_slice(bytes).map(Self::from_response)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn first(&self) -> Option<&Edge> {
        self.edges.first()
    }

    pub fn available_sources(&self) -> Vec<LanguageId> {
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .map(|edge| edge.source.clone())
            .filter(|source| seen.insert(source.clone()))
            .collect()
    }

    pub fn available_targets(&self, source: &LanguageId) -> Vec<LanguageId> {
        self.edges
            .iter()
            .filter(|edge| &edge.source == source)
            .map(|edge| edge.target.clone())
            .collect()
    }

    pub fn first_target(&self, source: &LanguageId) -> Option<LanguageId> {
        self.edges
            .iter()
            .find(|edge| &edge.source == source)
            .map(|edge| edge.target.clone())
    }

    pub fn has_source(&self, source: &LanguageId) -> bool {
        self.edges.iter().any(|edge| &edge.source == source)
    }

    pub fn has_edge(&self, source: &LanguageId, target: &LanguageId) -> bool {
        self.index.contains(&Edge {
            source: source.clone(),
            target: target.clone(),
        })
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.index.contains(edge)
    }
}

/// Fetches and indexes the engine's pair list.
///
/// Callers are expected to fall back to [`PairCatalog::empty`] on error so the
/// front end can still start and report that no pairs are available.
pub async fn fetch_catalog<E>(engine: &E) -> Result<PairCatalog, TranslatorError>
where
    E: TranslationEngine + ?Sized,
{
    let response = engine.supported_pairs().await?;
    let catalog = PairCatalog::from_response(response);
    info!(pairs = catalog.len(), "loaded supported language pairs");
    Ok(catalog)
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
