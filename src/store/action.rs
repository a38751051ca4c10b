use super::appointment::AppointmentAction;
use super::auth::AuthAction;
use super::case_history::CaseHistoryAction;
use super::dashboard::DashboardAction;
use super::modal::ModalAction;
use super::request::RequestId;

/// Outcome phase of an async operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Pending,
    Fulfilled(T),
    /// Normalized, displayable error message.
    Rejected(String),
}

/// One phase of one dispatched operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncAction<T> {
    pub request: RequestId,
    pub phase: Phase<T>,
}

impl<T> AsyncAction<T> {
    pub fn pending(request: RequestId) -> Self {
        Self { request, phase: Phase::Pending }
    }

    pub fn fulfilled(request: RequestId, payload: T) -> Self {
        Self { request, phase: Phase::Fulfilled(payload) }
    }

    pub fn rejected(request: RequestId, message: String) -> Self {
        Self { request, phase: Phase::Rejected(message) }
    }

    /// The request this action settles, if it is a fulfilled/rejected phase.
    pub fn settles(&self) -> Option<RequestId> {
        match self.phase {
            Phase::Pending => None,
            Phase::Fulfilled(_) | Phase::Rejected(_) => Some(self.request),
        }
    }
}

/// Anything the store can process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Modal(ModalAction),
    Dashboard(DashboardAction),
    Appointment(AppointmentAction),
    CaseHistory(CaseHistoryAction),
}

impl Action {
    pub fn settles(&self) -> Option<RequestId> {
        match self {
            Self::Auth(action) => action.settles(),
            Self::Modal(_) => None,
            Self::Dashboard(action) => action.settles(),
            Self::Appointment(action) => action.settles(),
            Self::CaseHistory(action) => action.settles(),
        }
    }
}

/// Slices that carry the shared loading/error/success fields.
pub trait AsyncSlice {
    fn set_loading(&mut self, loading: bool);
    fn set_error(&mut self, error: Option<String>);
    fn set_success(&mut self, success: Option<String>);

    fn clear_messages(&mut self) {
        self.set_error(None);
        self.set_success(None);
    }
}

/// Apply the common pending/fulfilled/rejected transitions, delegating the
/// payload to `on_fulfilled`.
pub(crate) fn apply_phase<S, T, F>(slice: &mut S, phase: Phase<T>, on_fulfilled: F)
where
    S: AsyncSlice,
    F: FnOnce(&mut S, T),
{
    match phase {
        Phase::Pending => {
            slice.set_loading(true);
            slice.set_error(None);
        }
        Phase::Fulfilled(payload) => {
            slice.set_loading(false);
            on_fulfilled(slice, payload);
        }
        Phase::Rejected(message) => {
            slice.set_loading(false);
            slice.set_error(Some(message));
        }
    }
}

macro_rules! impl_async_slice {
    ($ty:ty) => {
        impl $crate::store::action::AsyncSlice for $ty {
            fn set_loading(&mut self, loading: bool) {
                self.loading = loading;
            }
            fn set_error(&mut self, error: Option<String>) {
                self.error = error;
            }
            fn set_success(&mut self, success: Option<String>) {
                self.success = success;
            }
        }
    };
}

pub(crate) use impl_async_slice;
