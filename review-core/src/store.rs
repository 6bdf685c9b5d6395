//! AnalysisStore - owner of the analysis request lifecycle
//!
//! The store holds exactly one authoritative [`RequestState`]. It is written
//! only by the submit/resolve path and read by any number of listeners.
//!
//! # Supersede semantics
//!
//! Every `submit` takes a ticket from a monotonically increasing counter. When
//! the service call resolves, its outcome is published only if the ticket is
//! still the newest one issued. A slow first request that resolves after a
//! fast second one is dropped on the floor, so the visible state always
//! belongs to the most recently *submitted* request.
//!
//! # Example
//!
//! ```ignore
//! let store = AnalysisStore::new(service);
//! let _sub = store.subscribe(|state| render(state));
//! spawn_local(store.submit(AnalyzeRequest::new("hello")));
//! assert!(store.current_state().is_loading());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use shared_types::{AnalysisResult, AnalyzeRequest, Verdict};

use crate::client::AnalysisService;
use crate::error::ServiceError;

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// No analysis has been requested yet
    #[default]
    Idle,
    /// The newest request is in flight
    Loading,
    Success(Rc<AnalysisResult>),
    Error(String),
}

impl RequestState {
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            RequestState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.result().map(|r| r.verdict)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn is_block(&self) -> bool {
        self.verdict() == Some(Verdict::Block)
    }
}

/// Identity of one `submit` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// What happened to a submission once its service call resolved
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The outcome became the store's state
    Published(RequestState),
    /// A newer submission was issued first; the outcome was discarded
    Superseded,
}

impl SubmitOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, SubmitOutcome::Published(_))
    }
}

// ============================================================================
// Store
// ============================================================================

type Listener = Rc<dyn Fn(&RequestState)>;

struct Inner {
    state: RequestState,
    last_result: Option<Rc<AnalysisResult>>,
    issued: u64,
    next_listener_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Cheap to clone; all clones share one state.
#[derive(Clone)]
pub struct AnalysisStore {
    inner: Rc<RefCell<Inner>>,
    service: Rc<dyn AnalysisService>,
}

impl fmt::Debug for AnalysisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("AnalysisStore")
            .field("state", &inner.state)
            .field("issued", &inner.issued)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Two handles are equal when they share the same state.
impl PartialEq for AnalysisStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl AnalysisStore {
    pub fn new(service: Rc<dyn AnalysisService>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: RequestState::Idle,
                last_result: None,
                issued: 0,
                next_listener_id: 0,
                listeners: Vec::new(),
            })),
            service,
        }
    }

    pub fn current_state(&self) -> RequestState {
        self.inner.borrow().state.clone()
    }

    /// Last successful result, kept while a newer request is in flight.
    /// Cleared when a request fails.
    pub fn last_result(&self) -> Option<Rc<AnalysisResult>> {
        self.inner.borrow().last_result.clone()
    }

    /// Register a listener called after every state transition. The listener
    /// stays registered for as long as the returned [`Subscription`] lives.
    pub fn subscribe(&self, listener: impl Fn(&RequestState) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Start an analysis.
    ///
    /// The store is already `Loading` when this returns; the service is called
    /// when the returned future is first polled. Callers must drive the future
    /// to completion, otherwise the store stays `Loading` until a later
    /// submission supersedes it.
    pub fn submit(&self, request: AnalyzeRequest) -> LocalBoxFuture<'static, SubmitOutcome> {
        let ticket = self.begin();
        let store = self.clone();
        async move {
            let outcome = store.service.analyze(request).await;
            store.resolve(ticket, outcome)
        }
        .boxed_local()
    }

    fn begin(&self) -> RequestTicket {
        let ticket = {
            let mut inner = self.inner.borrow_mut();
            inner.issued += 1;
            RequestTicket(inner.issued)
        };
        tracing::debug!(seq = ticket.seq(), "analysis submitted");
        self.publish(RequestState::Loading);
        ticket
    }

    fn resolve(
        &self,
        ticket: RequestTicket,
        outcome: Result<AnalysisResult, ServiceError>,
    ) -> SubmitOutcome {
        let latest = self.inner.borrow().issued;
        if ticket.seq() != latest {
            tracing::debug!(seq = ticket.seq(), latest, "discarding superseded analysis result");
            return SubmitOutcome::Superseded;
        }

        let next = match outcome {
            Ok(result) => {
                tracing::info!(
                    seq = ticket.seq(),
                    verdict = %result.verdict,
                    score = result.score,
                    "analysis published"
                );
                let result = Rc::new(result);
                self.inner.borrow_mut().last_result = Some(result.clone());
                RequestState::Success(result)
            }
            Err(err) => {
                tracing::warn!(seq = ticket.seq(), error = %err, "analysis request failed");
                self.inner.borrow_mut().last_result = None;
                RequestState::Error(err.to_string())
            }
        };
        self.publish(next.clone());
        SubmitOutcome::Published(next)
    }

    fn publish(&self, next: RequestState) {
        // Listeners may read the store or submit again; release the borrow
        // before calling out.
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            inner.state = next.clone();
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(&next);
        }
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    store: Weak<RefCell<Inner>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
