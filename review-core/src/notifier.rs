//! BlockNotifier - the time-bounded toast shown when a prompt is blocked.
//!
//! The notifier is a plain state machine; it does not own a timer. Each time
//! it becomes visible it hands out a fresh generation together with the
//! timeout, and the host schedules `expire(generation)`. Any later transition
//! bumps the generation, so a timer that fires late is a no-op.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::store::RequestState;
use crate::verdict::BlockCategory;

pub const BLOCK_NOTICE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub enum NoticeState {
    Hidden,
    Visible {
        message: String,
        shown_at: DateTime<Utc>,
        generation: u64,
    },
}

/// What the host has to do after feeding a state into the notifier
#[derive(Debug, Clone, PartialEq)]
pub enum NoticeChange {
    /// Show (or re-show) the toast and arm a timer for `generation`
    Shown {
        generation: u64,
        message: String,
        timeout: Duration,
    },
    /// Hide the toast and drop any armed timer
    Hidden,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct BlockNotifier {
    state: NoticeState,
    generation: u64,
    timeout: Duration,
}

impl Default for BlockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockNotifier {
    pub fn new() -> Self {
        Self {
            state: NoticeState::Hidden,
            generation: 0,
            timeout: BLOCK_NOTICE_TIMEOUT,
        }
    }

    pub fn state(&self) -> &NoticeState {
        &self.state
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, NoticeState::Visible { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match &self.state {
            NoticeState::Visible { message, .. } => Some(message),
            NoticeState::Hidden => None,
        }
    }

    /// Time left before auto-dismiss, `None` while hidden.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        match &self.state {
            NoticeState::Visible { shown_at, .. } => {
                let elapsed = (now - *shown_at).to_std().unwrap_or(Duration::ZERO);
                Some(self.timeout.saturating_sub(elapsed))
            }
            NoticeState::Hidden => None,
        }
    }

    /// Feed the latest published store state.
    pub fn observe(&mut self, state: &RequestState, now: DateTime<Utc>) -> NoticeChange {
        match state.result() {
            Some(result) if result.verdict.is_block() => {
                let message = BlockCategory::from_highlights(&result.highlights).notice();
                self.generation += 1;
                self.state = NoticeState::Visible {
                    message: message.clone(),
                    shown_at: now,
                    generation: self.generation,
                };
                NoticeChange::Shown {
                    generation: self.generation,
                    message,
                    timeout: self.timeout,
                }
            }
            _ => {
                if self.hide() {
                    NoticeChange::Hidden
                } else {
                    NoticeChange::Unchanged
                }
            }
        }
    }

    /// User clicked the close button.
    pub fn dismiss(&mut self) -> bool {
        self.hide()
    }

    /// Timer for `generation` fired. Ignored if the toast has since been
    /// hidden or re-shown.
    pub fn expire(&mut self, generation: u64) -> bool {
        match self.state {
            NoticeState::Visible {
                generation: current,
                ..
            } if current == generation => self.hide(),
            _ => false,
        }
    }

    fn hide(&mut self) -> bool {
        if self.is_visible() {
            self.generation += 1;
            self.state = NoticeState::Hidden;
            true
        } else {
            false
        }
    }
}
