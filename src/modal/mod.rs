//! Modal orchestration: one global slot, a router that turns it into a
//! typed view, and a host that mounts the overlay.

pub mod overlay;
pub mod router;

pub use overlay::{ClickTarget, MemoryViewport, ModalHost, ScrollLock, Viewport};
pub use router::{ModalRouter, ModalView};

use crate::store::{Action, ModalAction, ModalData, ModalType};

/// Attach `data`, then open `modal_type`.
pub fn open_with(modal_type: ModalType, data: ModalData) -> [Action; 2] {
    [
        Action::Modal(ModalAction::AttachData(data)),
        Action::Modal(ModalAction::Open(modal_type)),
    ]
}

pub fn open(modal_type: ModalType) -> Action {
    Action::Modal(ModalAction::Open(modal_type))
}

pub fn close() -> Action {
    Action::Modal(ModalAction::Close)
}
