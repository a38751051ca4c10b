use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::router::{ModalRouter, ModalView};
use crate::store::{Action, ModalAction, RootState};

/// Page-level surface the overlay sits on.
pub trait Viewport {
    fn set_scroll_locked(&self, locked: bool);
}

/// Viewport that only records the lock flag.
#[derive(Debug, Default)]
pub struct MemoryViewport {
    locked: AtomicBool,
    changes: AtomicUsize,
}

impl MemoryViewport {
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    /// Number of lock/unlock calls received.
    pub fn changes(&self) -> usize {
        self.changes.load(Ordering::SeqCst)
    }
}

impl Viewport for MemoryViewport {
    fn set_scroll_locked(&self, locked: bool) {
        self.locked.store(locked, Ordering::SeqCst);
        self.changes.fetch_add(1, Ordering::SeqCst);
    }
}

// ═══════════════════════════════════════════════════════════
// ScrollLock — RAII page scroll lock
// ═══════════════════════════════════════════════════════════

/// Locks page scroll for as long as it lives.
pub struct ScrollLock<V: Viewport> {
    viewport: Arc<V>,
}

impl<V: Viewport> ScrollLock<V> {
    fn acquire(viewport: Arc<V>) -> Self {
        viewport.set_scroll_locked(true);
        Self { viewport }
    }
}

impl<V: Viewport> Drop for ScrollLock<V> {
    fn drop(&mut self) {
        self.viewport.set_scroll_locked(false);
    }
}

/// Where a click landed relative to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Body,
}

/// Mounts at most one modal overlay, following the store's modal slot.
pub struct ModalHost<V: Viewport> {
    viewport: Arc<V>,
    mounted: Option<(ModalView, ScrollLock<V>)>,
}

impl<V: Viewport> ModalHost<V> {
    pub fn new(viewport: Arc<V>) -> Self {
        Self {
            viewport,
            mounted: None,
        }
    }

    /// Re-render from current state. Returns the mounted view.
    pub fn sync(&mut self, state: &RootState) -> Option<&ModalView> {
        match ModalRouter::resolve(&state.modal, &state.auth) {
            Some(view) => {
                let lock = match self.mounted.take() {
                    Some((_, lock)) => lock,
                    None => ScrollLock::acquire(Arc::clone(&self.viewport)),
                };
                self.mounted = Some((view, lock));
            }
            // Dropping the lock unlocks scroll.
            None => self.mounted = None,
        }
        self.view()
    }

    pub fn view(&self) -> Option<&ModalView> {
        self.mounted.as_ref().map(|(view, _)| view)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Backdrop clicks close the modal; clicks inside the body stop there.
    pub fn click(&self, target: ClickTarget) -> Option<Action> {
        match (target, self.is_mounted()) {
            (ClickTarget::Backdrop, true) => Some(Action::Modal(ModalAction::Close)),
            _ => None,
        }
    }
}
