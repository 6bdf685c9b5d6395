//! ChatInputController - owns the prompt text field and the transcript.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use shared_types::Persona;

use crate::bridge::{RewriteBridge, RewriteRegistration};
use crate::config::ReviewConfig;
use crate::store::{AnalysisStore, RequestState, SubmitOutcome};
use crate::verdict::assistant_summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. The transcript is append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

pub fn greeting(persona: Persona) -> String {
    format!(
        "Hello! I'm the {}. Submit a prompt, and I'll analyze its structure, safety, and clarity for you. Let's get started!",
        persona.display_name()
    )
}

struct ChatInner {
    text: String,
    transcript: Vec<Turn>,
    persona: Persona,
}

#[derive(Clone)]
pub struct ChatInputController {
    inner: Rc<RefCell<ChatInner>>,
    store: AnalysisStore,
    config: Rc<ReviewConfig>,
}

impl fmt::Debug for ChatInputController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ChatInputController")
            .field("persona", &inner.persona)
            .field("turns", &inner.transcript.len())
            .finish()
    }
}

impl PartialEq for ChatInputController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ChatInputController {
    pub fn new(store: AnalysisStore, config: ReviewConfig) -> Self {
        let persona = config.persona;
        Self {
            inner: Rc::new(RefCell::new(ChatInner {
                text: String::new(),
                transcript: vec![Turn::new(Role::Assistant, greeting(persona))],
                persona,
            })),
            store,
            config: Rc::new(config),
        }
    }

    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    /// Replace the field content wholesale.
    pub fn set_text(&self, text: &str) {
        self.inner.borrow_mut().text = text.to_string();
    }

    pub fn transcript(&self) -> Vec<Turn> {
        self.inner.borrow().transcript.clone()
    }

    pub fn persona(&self) -> Persona {
        self.inner.borrow().persona
    }

    /// Applies to the next submission only.
    pub fn set_persona(&self, persona: Persona) {
        self.inner.borrow_mut().persona = persona;
    }

    pub fn can_submit(&self) -> bool {
        !self.inner.borrow().text.trim().is_empty()
    }

    /// Send the current text for analysis.
    ///
    /// Returns `None` when the field is blank. Otherwise the user turn is
    /// recorded, the field cleared and the store already `Loading`; the
    /// returned future drives the service call and appends an assistant turn
    /// if this submission is the one that gets published.
    ///
    /// The future must be polled to completion: dropped unpolled, the store
    /// stays `Loading`. It holds no strong reference to the controller, so a
    /// host may keep driving it after the input that created it is gone.
    pub fn submit(&self) -> Option<LocalBoxFuture<'static, SubmitOutcome>> {
        let (prompt, persona) = {
            let mut inner = self.inner.borrow_mut();
            if inner.text.trim().is_empty() {
                return None;
            }
            let prompt = std::mem::take(&mut inner.text);
            inner.transcript.push(Turn::new(Role::User, prompt.clone()));
            (prompt, inner.persona)
        };

        let pending = self.store.submit(self.config.request(prompt, persona));
        let owner = Rc::downgrade(&self.inner);
        Some(
            async move {
                let outcome = pending.await;
                if let SubmitOutcome::Published(state) = &outcome {
                    record_reply(&owner, state);
                }
                outcome
            }
            .boxed_local(),
        )
    }

    /// Make this controller the rewrite target. `on_rewrite` runs after the
    /// field has been replaced, so a view can refresh itself.
    pub fn attach(
        &self,
        bridge: &RewriteBridge,
        on_rewrite: impl Fn(&str) + 'static,
    ) -> RewriteRegistration {
        let owner = Rc::downgrade(&self.inner);
        bridge.register(move |text| {
            if let Some(inner) = owner.upgrade() {
                inner.borrow_mut().text = text.to_string();
                on_rewrite(text);
            }
        })
    }
}

fn record_reply(owner: &Weak<RefCell<ChatInner>>, state: &RequestState) {
    let Some(inner) = owner.upgrade() else {
        return;
    };
    let reply = match state {
        RequestState::Success(result) => assistant_summary(result),
        RequestState::Error(message) => format!("Analysis failed: {message}"),
        RequestState::Idle | RequestState::Loading => return,
    };
    inner
        .borrow_mut()
        .transcript
        .push(Turn::new(Role::Assistant, reply));
}
