//! Source/target selection state machine driven by the pair catalog.

use std::{fmt, sync::Arc};

use shared::{
    domain::{Edge, LanguageId},
    error::TranslatorError,
};
use tracing::{debug, info};

use crate::catalog::PairCatalog;

/// Pair selected on startup when the catalog offers it.
pub const DEFAULT_PREFERRED_PAIR: (&str, &str) = ("c#", "c");

pub fn default_preferred_edge() -> Edge {
    Edge::new(DEFAULT_PREFERRED_PAIR.0, DEFAULT_PREFERRED_PAIR.1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Uninitialized,
    /// The catalog has no edges at all.
    Empty,
    /// `target` is only `None` after a source change or swap left the new
    /// source without any outgoing edge.
    Ready {
        source: LanguageId,
        target: Option<LanguageId>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub source: Option<LanguageId>,
    pub target: Option<LanguageId>,
}

impl Selection {
    pub fn edge(&self) -> Option<Edge> {
        match (&self.source, &self.target) {
            (Some(source), Some(target)) => Some(Edge {
                source: source.clone(),
                target: target.clone(),
            }),
            _ => None,
        }
    }
}

/// Emitted when a swap could not simply reverse the pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapAdvisory {
    /// The reversed direction the user asked for, absent from the catalog.
    pub requested: Edge,
    /// First available target of the new source, if it has any.
    pub substituted: Option<LanguageId>,
}

impl fmt::Display for SwapAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Note: Direct swap between {} and {} is not a supported pair.",
            self.requested.target.label(),
            self.requested.source.label()
        )?;
        match &self.substituted {
            Some(target) => write!(
                f,
                " Selecting first available target ({}).",
                target.label()
            ),
            None => write!(
                f,
                " No target language is available for {}.",
                self.requested.source.label()
            ),
        }
    }
}

pub struct PairSelectionController {
    catalog: Arc<PairCatalog>,
    state: SelectionState,
}

impl PairSelectionController {
    pub fn new(catalog: Arc<PairCatalog>) -> Self {
        Self {
            catalog,
            state: SelectionState::Uninitialized,
        }
    }

    /// Applies the default-pair rule: the preferred edge when the catalog has
    /// it, otherwise the first edge in arrival order.
    pub fn init(&mut self, preferred: Option<&Edge>) -> &SelectionState {
        self.state = match preferred.filter(|edge| self.catalog.contains(edge)) {
            Some(edge) => ready(edge.source.clone(), Some(edge.target.clone())),
            None => match self.catalog.first() {
                Some(edge) => ready(edge.source.clone(), Some(edge.target.clone())),
                None => SelectionState::Empty,
            },
        };
        info!(state = ?self.state, "initialized language pair selection");
        &self.state
    }

    pub fn catalog(&self) -> &Arc<PairCatalog> {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selection(&self) -> Selection {
        match &self.state {
            SelectionState::Ready { source, target } => Selection {
                source: Some(source.clone()),
                target: target.clone(),
            },
            SelectionState::Uninitialized | SelectionState::Empty => Selection::default(),
        }
    }

    pub fn current_edge(&self) -> Option<Edge> {
        self.selection().edge()
    }

    pub fn available_sources(&self) -> Vec<LanguageId> {
        self.catalog.available_sources()
    }

    /// Targets reachable from the current source.
    pub fn available_targets(&self) -> Vec<LanguageId> {
        match &self.state {
            SelectionState::Ready { source, .. } => self.catalog.available_targets(source),
            SelectionState::Uninitialized | SelectionState::Empty => Vec::new(),
        }
    }

    /// Maps typed text onto a served source id, preferring an exact match.
    /// Unmatched input is returned verbatim so `set_source` can reject it.
    pub fn resolve_source(&self, input: &str) -> LanguageId {
        resolve_input(self.available_sources(), input)
    }

    /// Like [`resolve_source`](Self::resolve_source), over the current source's targets.
    pub fn resolve_target(&self, input: &str) -> LanguageId {
        resolve_input(self.available_targets(), input)
    }

    pub fn set_source(&mut self, source: &LanguageId) -> Result<(), TranslatorError> {
        if !self.catalog.has_source(source) {
            debug!(%source, "rejected unknown source language");
            return Err(TranslatorError::validation(format!(
                "{} is not an available source language",
                source.label()
            )));
        }

        let current_target = self.selection().target;
        let target = match current_target {
            Some(target) if self.catalog.has_edge(source, &target) => Some(target),
            _ => self.catalog.first_target(source),
        };
        self.state = ready(source.clone(), target);
        Ok(())
    }

    pub fn set_target(&mut self, target: &LanguageId) -> Result<(), TranslatorError> {
        let SelectionState::Ready { source, .. } = &self.state else {
            return Err(TranslatorError::validation(
                "select a source language before choosing a target",
            ));
        };
        if !self.catalog.has_edge(source, target) {
            let edge = Edge {
                source: source.clone(),
                target: target.clone(),
            };
            debug!(%edge, "rejected unsupported target language");
            return Err(TranslatorError::edge_not_supported(edge));
        }
        self.state = ready(source.clone(), Some(target.clone()));
        Ok(())
    }

    /// Swaps source and target.
    ///
    /// When the reversed edge is missing the old target becomes the source and
    /// the target falls back to its first available target (or none), so
    /// swapping twice does not necessarily restore the original pair.
    pub fn swap(&mut self) -> Result<Option<SwapAdvisory>, TranslatorError> {
        let Some(current) = self.current_edge() else {
            return Err(TranslatorError::validation(
                "select both languages before swapping",
            ));
        };

        let requested = current.reversed();
        if self.catalog.contains(&requested) {
            self.state = ready(requested.source, Some(requested.target));
            return Ok(None);
        }

        let substituted = self.catalog.first_target(&requested.source);
        self.state = ready(requested.source.clone(), substituted.clone());
        let advisory = SwapAdvisory {
            requested,
            substituted,
        };
        info!(%advisory, "swap fell back to first available target");
        Ok(Some(advisory))
    }
}

fn resolve_input(candidates: Vec<LanguageId>, input: &str) -> LanguageId {
    let input = input.trim();
    if let Some(exact) = candidates.iter().find(|id| id.as_str() == input) {
        return exact.clone();
    }
    candidates
        .into_iter()
        .find(|id| id.matches_input(input))
        .unwrap_or_else(|| LanguageId::new(input))
}

fn ready(source: LanguageId, target: Option<LanguageId>) -> SelectionState {
    SelectionState::Ready { source, target }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
