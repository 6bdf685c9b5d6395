//! RewriteBridge - lets a result consumer push text into whichever component
//! currently owns the prompt input, without either side holding a reference
//! to the other.
//!
//! The bridge is a single slot. Registering hands back a
//! [`RewriteRegistration`] guard; the callback is reachable only while that
//! guard lives, so an unmounted owner can never be called.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::MissingRewriteTarget;

type RewriteCallback = Rc<dyn Fn(&str)>;

#[derive(Default)]
struct Slot {
    generation: u64,
    callback: Option<RewriteCallback>,
}

#[derive(Clone, Default)]
pub struct RewriteBridge {
    slot: Rc<RefCell<Slot>>,
}

impl fmt::Debug for RewriteBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteBridge")
            .field("has_target", &self.has_target())
            .finish()
    }
}

impl PartialEq for RewriteBridge {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl RewriteBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `callback` as the rewrite target, replacing any previous one.
    pub fn register(&self, callback: impl Fn(&str) + 'static) -> RewriteRegistration {
        let mut slot = self.slot.borrow_mut();
        slot.generation += 1;
        slot.callback = Some(Rc::new(callback));
        RewriteRegistration {
            slot: Rc::downgrade(&self.slot),
            generation: slot.generation,
        }
    }

    pub fn has_target(&self) -> bool {
        self.slot.borrow().callback.is_some()
    }

    /// Deliver `text` to the registered owner.
    pub fn apply(&self, text: &str) -> Result<(), MissingRewriteTarget> {
        // Clone out of the slot so the callback may re-register.
        let callback = self.slot.borrow().callback.clone();
        match callback {
            Some(callback) => {
                callback(text);
                Ok(())
            }
            None => {
                tracing::debug!("rewrite requested with no registered input");
                Err(MissingRewriteTarget)
            }
        }
    }
}

/// Scoped ownership of the bridge slot. Dropping it clears the slot unless a
/// newer registration has already replaced it.
#[must_use = "dropping a RewriteRegistration immediately revokes it"]
pub struct RewriteRegistration {
    slot: Weak<RefCell<Slot>>,
    generation: u64,
}

impl RewriteRegistration {
    pub fn revoke(self) {}

    pub fn is_active(&self) -> bool {
        self.slot.upgrade().is_some_and(|slot| {
            let slot = slot.borrow();
            slot.generation == self.generation && slot.callback.is_some()
        })
    }
}

impl Drop for RewriteRegistration {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.upgrade() {
            let mut slot = slot.borrow_mut();
            if slot.generation == self.generation {
                slot.callback = None;
            }
        }
    }
}

impl fmt::Debug for RewriteRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteRegistration")
            .field("generation", &self.generation)
            .finish()
    }
}

// ============================================================================
// Rewrite modes
// ============================================================================

/// Presentation transform applied to the suggested rewrite before it is
/// handed to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RewriteMode {
    #[default]
    Normal,
    Rap,
    Poem,
    Meme,
}

impl RewriteMode {
    pub const ALL: [RewriteMode; 4] = [
        RewriteMode::Normal,
        RewriteMode::Rap,
        RewriteMode::Poem,
        RewriteMode::Meme,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RewriteMode::Normal => "Use Fixed Version",
            RewriteMode::Rap => "Rap Mode",
            RewriteMode::Poem => "Poem Mode",
            RewriteMode::Meme => "Meme Mode",
        }
    }

    fn style_name(&self) -> Option<&'static str> {
        match self {
            RewriteMode::Normal => None,
            RewriteMode::Rap => Some("rap"),
            RewriteMode::Poem => Some("poem"),
            RewriteMode::Meme => Some("meme"),
        }
    }

    pub fn transform(&self, base: &str) -> String {
        match self.style_name() {
            None => base.to_string(),
            Some(style) => format!(
                "Rewrite this prompt in {style} style while keeping it safe and professional: \"{base}\""
            ),
        }
    }
}
