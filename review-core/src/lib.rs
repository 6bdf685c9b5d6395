//! Analysis-result orchestration for the prompt review dashboard.
//!
//! The [`AnalysisStore`] owns the lifecycle of the newest analysis request and
//! fans each transition out to independent consumers:
//!
//! - [`ResultPresenter`] renders verdict, score, COSTAR and the rewrite
//! - [`BlockNotifier`] shows a ten second toast on `BLOCK`
//! - [`RecommendationGate`] decides when to offer example prompts
//! - [`ChatInputController`] records the transcript
//!
//! The presenter writes back into the input through the [`RewriteBridge`]
//! without either side knowing about the other.
//!
//! Everything is single-threaded and executor agnostic; the browser crate
//! drives the futures and timers.

pub mod bridge;
pub mod chat;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gate;
pub mod notifier;
pub mod presenter;
pub mod session;
pub mod store;
pub mod verdict;

#[cfg(test)]
pub(crate) mod testing;

pub use bridge::{RewriteBridge, RewriteMode, RewriteRegistration};
pub use chat::{ChatInputController, Role, Turn};
pub use client::AnalysisService;
pub use config::ReviewConfig;
pub use diagnostics::{run_self_test, DiagnosticReport};
pub use error::{ConfigError, MissingRewriteTarget, ServiceError};
pub use gate::{GateView, RecommendationGate, RecommendedPrompt};
pub use notifier::{BlockNotifier, NoticeChange, BLOCK_NOTICE_TIMEOUT};
pub use presenter::{PanelView, Report, ResultPresenter, RewriteFeedback};
pub use session::ReviewSession;
pub use store::{AnalysisStore, RequestState, SubmitOutcome, Subscription};
pub use verdict::{Interpret, ScoreBand, Tone};
