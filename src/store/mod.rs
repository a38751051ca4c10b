//! Global client store.
//!
//! `Store` owns the five slices and applies actions strictly one at a
//! time. It is created explicitly and shared as `Arc<Store>`; there is no
//! ambient instance, so each test builds its own.
//!
//! Settlements of superseded list fetches are dropped under
//! [`StalePolicy::LatestIssued`] (see [`request::RequestTracker`]).

pub mod action;
pub mod appointment;
pub mod auth;
pub mod case_history;
pub mod dashboard;
pub mod modal;
pub mod request;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub use action::{Action, AsyncAction, Phase};
pub use appointment::{AppointmentAction, AppointmentState, SlotsPayload, StatusChange};
pub use auth::{AuthAction, AuthState, LoginPayload};
pub use case_history::{CaseHistoryAction, CaseHistoryState};
pub use dashboard::{DashboardAction, DashboardState};
pub use modal::{ModalAction, ModalData, ModalState, ModalType};
pub use request::{OperationKind, RequestId, RequestTracker, Resource};

use crate::config::StalePolicy;

/// The whole client state tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub auth: AuthState,
    pub modal: ModalState,
    pub dashboard: DashboardState,
    pub appointment: AppointmentState,
    pub case_history: CaseHistoryState,
}

impl RootState {
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Auth(a) => self.auth.reduce(a),
            Action::Modal(a) => self.modal.reduce(a),
            Action::Dashboard(a) => self.dashboard.reduce(a),
            Action::Appointment(a) => self.appointment.reduce(a),
            Action::CaseHistory(a) => self.case_history.reduce(a),
        }
    }
}

/// Slices with transient error/success messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSlice {
    Auth,
    Dashboard,
    Appointment,
    CaseHistory,
}

impl MessageSlice {
    pub fn clear_action(self) -> Action {
        match self {
            Self::Auth => Action::Auth(AuthAction::ClearMessages),
            Self::Dashboard => Action::Dashboard(DashboardAction::ClearMessages),
            Self::Appointment => Action::Appointment(AppointmentAction::ClearMessages),
            Self::CaseHistory => Action::CaseHistory(CaseHistoryAction::ClearMessages),
        }
    }
}

pub struct Store {
    state: Mutex<RootState>,
    tracker: Mutex<RequestTracker>,
    policy: StalePolicy,
    version: watch::Sender<u64>,
}

impl Store {
    pub fn new(policy: StalePolicy) -> Self {
        Self::with_state(RootState::default(), policy)
    }

    pub fn with_state(state: RootState, policy: StalePolicy) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            state: Mutex::new(state),
            tracker: Mutex::new(RequestTracker::new()),
            policy,
            version,
        }
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    // A reducer never panics mid-update, so a poisoned lock still holds a
    // consistent tree.
    fn lock_state(&self) -> MutexGuard<'_, RootState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_tracker(&self) -> MutexGuard<'_, RequestTracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new request of `kind`, superseding older fetches of the
    /// same resource.
    pub fn begin(&self, kind: OperationKind) -> RequestId {
        self.lock_tracker().issue(kind)
    }

    /// Apply one action. Returns `false` when the action was a stale
    /// settlement and was dropped.
    pub fn dispatch(&self, action: Action) -> bool {
        let mut state = self.lock_state();

        if let (StalePolicy::LatestIssued, Some(request)) = (self.policy, action.settles()) {
            if !self.lock_tracker().is_current(request) {
                tracing::debug!(
                    operation = %request.kind,
                    seq = request.seq,
                    "Dropping response superseded by a newer request"
                );
                return false;
            }
        }

        state.reduce(action);
        drop(state);

        self.version.send_modify(|v| *v += 1);
        true
    }

    /// Read through a selector. Only owned values leave the lock.
    pub fn select<R, F>(&self, selector: F) -> R
    where
        F: FnOnce(&RootState) -> R,
    {
        selector(&self.lock_state())
    }

    pub fn snapshot(&self) -> RootState {
        self.lock_state().clone()
    }

    /// Change notifications: the value is a counter bumped per applied action.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Clear a slice's error/success messages after `delay`.
    pub fn schedule_clear(self: &Arc<Self>, slice: MessageSlice, delay: Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.dispatch(slice.clear_action());
        })
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StalePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DoctorProfile;

    fn doctors(ids: &[&str]) -> Vec<DoctorProfile> {
        ids.iter()
            .map(|id| DoctorProfile {
                id: id.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn list_doctors(request: RequestId, phase: Phase<Vec<DoctorProfile>>) -> Action {
        Action::Dashboard(DashboardAction::ListDoctors(AsyncAction { request, phase }))
    }

    #[test]
    fn new_store_starts_with_session_loading() {
        let store = Store::default();
        let (loading, user) = store.select(|s| (s.auth.loading, s.auth.user.clone()));
        assert!(loading);
        assert!(user.is_none());
        assert!(!store.select(|s| s.modal.is_open));
    }

    #[test]
    fn stores_are_isolated() {
        let a = Store::default();
        let b = Store::default();
        a.dispatch(Action::Modal(ModalAction::Open(ModalType::InviteModal)));
        assert!(a.select(|s| s.modal.is_open));
        assert!(!b.select(|s| s.modal.is_open));
    }

    #[test]
    fn stale_settlement_is_dropped() {
        let store = Store::new(StalePolicy::LatestIssued);
        let old = store.begin(OperationKind::ListDoctors);
        let new = store.begin(OperationKind::ListDoctors);
        store.dispatch(list_doctors(old, Phase::Pending));
        store.dispatch(list_doctors(new, Phase::Pending));

        assert!(store.dispatch(list_doctors(new, Phase::Fulfilled(doctors(&["D2"])))));
        assert!(!store.dispatch(list_doctors(old, Phase::Fulfilled(doctors(&["D1"])))));

        let ids: Vec<String> = store.select(|s| s.dashboard.doctors.iter().map(|d| d.id.clone()).collect());
        assert_eq!(ids, vec!["D2"]);
        assert!(!store.select(|s| s.dashboard.loading));
    }

    #[test]
    fn stale_rejection_is_dropped_too() {
        let store = Store::new(StalePolicy::LatestIssued);
        let old = store.begin(OperationKind::ListDoctors);
        let new = store.begin(OperationKind::ListDoctors);
        store.dispatch(list_doctors(new, Phase::Fulfilled(doctors(&["D2"]))));
        store.dispatch(list_doctors(old, Phase::Rejected("Failed to fetch doctors".into())));
        assert!(store.select(|s| s.dashboard.error.is_none()));
    }

    #[test]
    fn last_resolved_policy_applies_everything() {
        let store = Store::new(StalePolicy::LastResolved);
        let old = store.begin(OperationKind::ListDoctors);
        let new = store.begin(OperationKind::ListDoctors);
        store.dispatch(list_doctors(new, Phase::Fulfilled(doctors(&["D2"]))));
        assert!(store.dispatch(list_doctors(old, Phase::Fulfilled(doctors(&["D1"])))));
        let ids: Vec<String> = store.select(|s| s.dashboard.doctors.iter().map(|d| d.id.clone()).collect());
        assert_eq!(ids, vec!["D1"]);
    }

    #[test]
    fn dispatch_notifies_subscribers() {
        let store = Store::default();
        let rx = store.subscribe();
        let before = *rx.borrow();
        store.dispatch(Action::Modal(ModalAction::Close));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), before + 1);
    }

    #[tokio::test]
    async fn scheduled_clear_resets_messages() {
        let store = Arc::new(Store::default());
        let req = store.begin(OperationKind::ListDoctors);
        store.dispatch(list_doctors(req, Phase::Rejected("Failed to fetch doctors".into())));
        assert!(store.select(|s| s.dashboard.error.is_some()));

        store
            .schedule_clear(MessageSlice::Dashboard, Duration::from_millis(10))
            .await
            .unwrap();
        assert!(store.select(|s| s.dashboard.error.is_none()));
    }

    #[test]
    fn concurrent_dispatches_are_serialized() {
        use std::thread;

        let store = Arc::new(Store::default());
        let mut handles = vec![];
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..50 {
                    store.dispatch(Action::Modal(ModalAction::Open(ModalType::InviteModal)));
                    store.dispatch(Action::Modal(ModalAction::Close));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(*store.subscribe().borrow(), 800);
        assert!(!store.select(|s| s.modal.is_open));
    }
}
