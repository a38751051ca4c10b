//! Directory data for the landing page and management dashboards.

use super::action::{apply_phase, impl_async_slice, AsyncAction, AsyncSlice};
use super::request::RequestId;
use crate::models::{DoctorProfile, PatientProfile};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    ListDoctors(AsyncAction<Vec<DoctorProfile>>),
    ListPatients(AsyncAction<Vec<PatientProfile>>),
    ClearMessages,
}

impl DashboardAction {
    pub fn settles(&self) -> Option<RequestId> {
        match self {
            Self::ListDoctors(a) => a.settles(),
            Self::ListPatients(a) => a.settles(),
            Self::ClearMessages => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub doctors: Vec<DoctorProfile>,
    pub patients: Vec<PatientProfile>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl_async_slice!(DashboardState);

impl DashboardState {
    pub fn reduce(&mut self, action: DashboardAction) {
        match action {
            DashboardAction::ListDoctors(a) => {
                apply_phase(self, a.phase, |s, doctors| s.doctors = doctors)
            }
            DashboardAction::ListPatients(a) => {
                apply_phase(self, a.phase, |s, patients| s.patients = patients)
            }
            DashboardAction::ClearMessages => self.clear_messages(),
        }
    }

    pub fn doctor(&self, doctor_id: &str) -> Option<&DoctorProfile> {
        self.doctors.iter().find(|d| d.id == doctor_id)
    }

    /// Doctors accepting bookings, optionally narrowed to one specialization.
    pub fn available_doctors<'a>(
        &'a self,
        specialization: Option<&'a str>,
    ) -> impl Iterator<Item = &'a DoctorProfile> + 'a {
        self.doctors.iter().filter(move |d| {
            d.available
                && specialization.map_or(true, |wanted| {
                    d.specialization
                        .as_deref()
                        .is_some_and(|s| s.eq_ignore_ascii_case(wanted))
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::request::{OperationKind, RequestTracker};

    fn doctor(id: &str, specialization: &str, available: bool) -> DoctorProfile {
        DoctorProfile {
            id: id.into(),
            specialization: Some(specialization.into()),
            available,
            ..Default::default()
        }
    }

    #[test]
    fn refetch_replaces_list() {
        let mut tracker = RequestTracker::new();
        let mut state = DashboardState::default();
        state.reduce(DashboardAction::ListDoctors(AsyncAction::fulfilled(
            tracker.issue(OperationKind::ListDoctors),
            vec![doctor("D1", "Cardiology", true), doctor("D2", "Dermatology", true)],
        )));
        state.reduce(DashboardAction::ListDoctors(AsyncAction::fulfilled(
            tracker.issue(OperationKind::ListDoctors),
            vec![doctor("D3", "Cardiology", true)],
        )));
        assert_eq!(state.doctors.len(), 1);
        assert!(state.doctor("D3").is_some());
        assert!(state.doctor("D1").is_none());
    }

    #[test]
    fn rejection_keeps_previous_list() {
        let mut tracker = RequestTracker::new();
        let mut state = DashboardState::default();
        state.reduce(DashboardAction::ListDoctors(AsyncAction::fulfilled(
            tracker.issue(OperationKind::ListDoctors),
            vec![doctor("D1", "Cardiology", true)],
        )));
        let req = tracker.issue(OperationKind::ListDoctors);
        state.reduce(DashboardAction::ListDoctors(AsyncAction::pending(req)));
        state.reduce(DashboardAction::ListDoctors(AsyncAction::rejected(
            req,
            "Failed to fetch doctors".into(),
        )));
        assert!(!state.loading);
        assert_eq!(state.doctors.len(), 1);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch doctors"));
    }

    #[test]
    fn available_doctors_filters_by_specialization() {
        let state = DashboardState {
            doctors: vec![
                doctor("D1", "Cardiology", true),
                doctor("D2", "Cardiology", false),
                doctor("D3", "Pediatrics", true),
            ],
            ..Default::default()
        };
        let ids: Vec<_> = state
            .available_doctors(Some("cardiology"))
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["D1"]);
        assert_eq!(state.available_doctors(None).count(), 2);
    }
}
