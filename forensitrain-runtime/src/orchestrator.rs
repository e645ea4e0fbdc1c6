//! Investigation orchestrator
//!
//! Owns the visible state of one investigation surface. Each `search()`
//! takes the next value of a generation counter before going to the
//! network; on arrival the response is committed only if its generation is
//! still current. There is no wire-level abort: a superseded request is
//! simply ignored when it completes.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use forensitrain_client::{ClientError, SharedEnrichment};
use forensitrain_core::{build_result, InvestigationResult, RawEnrichment, Subject};

/// Errors from the orchestrator
#[derive(Debug, Error)]
pub enum SearchError {
    /// Empty or whitespace-only subject; no request was issued
    #[error("No subject provided")]
    EmptySubject,

    /// The enrichment request failed; message is user-displayable
    #[error("{0}")]
    Request(String),
}

/// Visible state of the investigation surface
#[derive(Debug, Clone, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success(Arc<InvestigationResult>),
    Error(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }
}

/// Per-surface investigation orchestrator
pub struct Orchestrator {
    client: SharedEnrichment,
    generation: AtomicU64,
    state: Mutex<SearchState>,
}

impl Orchestrator {
    pub fn new(client: SharedEnrichment) -> Self {
        Self {
            client,
            generation: AtomicU64::new(0),
            state: Mutex::new(SearchState::Idle),
        }
    }

    /// Snapshot of the visible state
    pub fn state(&self) -> SearchState {
        self.state.lock().clone()
    }

    /// Reset the surface, discarding any result or error.
    ///
    /// Also bumps the generation so an in-flight response cannot resurface.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.lock() = SearchState::Idle;
    }

    /// Start a new investigation for a raw subject string.
    ///
    /// Returns `Ok(Some(result))` when this search's response was committed,
    /// `Ok(None)` when a later search superseded it while in flight, and
    /// `Err` for empty subjects or failed requests. Whatever the exit path,
    /// the current generation never stays in `Loading`.
    pub async fn search(
        &self,
        raw_subject: &str,
    ) -> Result<Option<Arc<InvestigationResult>>, SearchError> {
        // Defend against blank input without disturbing visible state
        let subject = Subject::parse(raw_subject).ok_or(SearchError::EmptySubject)?;
        self.search_subject(subject).await
    }

    /// Start a new investigation for an already-classified subject.
    ///
    /// Surfaces that know the subject kind up front use this to bypass
    /// reclassification: an all-digit username submitted to a footprint
    /// view would otherwise parse as a phone number.
    pub async fn search_subject(
        &self,
        subject: Subject,
    ) -> Result<Option<Arc<InvestigationResult>>, SearchError> {
        if subject.value().trim().is_empty() {
            return Err(SearchError::EmptySubject);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        // Entering Loading clears any previous result or error immediately,
        // so stale payloads never render next to a fresh loading indicator.
        *self.state.lock() = SearchState::Loading;
        info!("Investigation {} started for {}", generation, subject);

        let outcome = self.run(&subject).await;

        // The generation re-check and the state write happen under one lock
        // acquisition: checked-then-committed with work in between would let
        // a superseded response land after a newer search already committed.
        // The result is built first so the commit window holds no work.
        match outcome {
            Ok(raw) => {
                let result = Arc::new(build_result(&subject, raw));
                {
                    let mut state = self.state.lock();
                    if self.generation.load(Ordering::SeqCst) != generation {
                        debug!(
                            "Investigation {} superseded, discarding its response",
                            generation
                        );
                        return Ok(None);
                    }
                    *state = SearchState::Success(result.clone());
                }
                info!(
                    "Investigation {} complete: {} nodes, {} links",
                    generation,
                    result.graph.node_count(),
                    result.graph.link_count()
                );
                Ok(Some(result))
            }
            Err(e) => {
                let message = e.to_string();
                {
                    let mut state = self.state.lock();
                    if self.generation.load(Ordering::SeqCst) != generation {
                        debug!(
                            "Investigation {} superseded, discarding its failure",
                            generation
                        );
                        return Ok(None);
                    }
                    *state = SearchState::Error(message.clone());
                }
                warn!("Investigation {} failed: {}", generation, message);
                Err(SearchError::Request(message))
            }
        }
    }

    /// Issue the enrichment call(s) for one subject
    async fn run(&self, subject: &Subject) -> Result<RawEnrichment, ClientError> {
        match subject {
            Subject::Phone(phone) => self.client.enrich_phone(phone).await,
            Subject::Handle(handle) => {
                let footprint = self.client.fetch_footprint(handle).await?;
                Ok(RawEnrichment {
                    geosocial: Some(footprint),
                    ..Default::default()
                })
            }
        }
    }
}
