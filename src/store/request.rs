//! Operation identities and the stale-response tracker.

use std::collections::HashMap;

/// Every async operation the client performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    CheckSession,
    Login,
    Register,
    Logout,
    UpdateProfile,
    SendInvite,
    ListDoctors,
    ListPatients,
    ListMyAppointments,
    ListDoctorAppointments,
    FetchAvailableSlots,
    BookAppointment,
    UpdateAppointmentStatus,
    CancelAppointment,
    ListMyCaseHistories,
}

/// Slice subtree that a fetch replaces wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Session,
    Doctors,
    Patients,
    Appointments,
    Slots,
    CaseHistories,
}

impl OperationKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::CheckSession => "check-session",
            Self::Login => "login",
            Self::Register => "register",
            Self::Logout => "logout",
            Self::UpdateProfile => "update-profile",
            Self::SendInvite => "send-invite",
            Self::ListDoctors => "list-doctors",
            Self::ListPatients => "list-patients",
            Self::ListMyAppointments => "list-my-appointments",
            Self::ListDoctorAppointments => "list-doctor-appointments",
            Self::FetchAvailableSlots => "fetch-available-slots",
            Self::BookAppointment => "book-appointment",
            Self::UpdateAppointmentStatus => "update-appointment-status",
            Self::CancelAppointment => "cancel-appointment",
            Self::ListMyCaseHistories => "list-my-case-histories",
        }
    }

    /// Error shown when the backend gives no message of its own.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::CheckSession => "Failed to check authentication",
            Self::Login => "Login failed",
            Self::Register => "Registration failed",
            Self::Logout => "Logout failed",
            Self::UpdateProfile => "Failed to update profile",
            Self::SendInvite => "Failed to send invite",
            Self::ListDoctors => "Failed to fetch doctors",
            Self::ListPatients => "Failed to fetch patients",
            Self::ListMyAppointments => "Failed to fetch appointments",
            Self::ListDoctorAppointments => "Failed to fetch doctor appointments",
            Self::FetchAvailableSlots => "Failed to fetch available slots",
            Self::BookAppointment => "Failed to book appointment",
            Self::UpdateAppointmentStatus => "Failed to update appointment status",
            Self::CancelAppointment => "Failed to cancel appointment",
            Self::ListMyCaseHistories => "Failed to fetch case histories",
        }
    }

    /// The resource a fetch replaces. Mutations return `None` and are
    /// never superseded.
    pub fn resource(self) -> Option<Resource> {
        match self {
            Self::CheckSession => Some(Resource::Session),
            Self::ListDoctors => Some(Resource::Doctors),
            Self::ListPatients => Some(Resource::Patients),
            Self::ListMyAppointments | Self::ListDoctorAppointments => {
                Some(Resource::Appointments)
            }
            Self::FetchAvailableSlots => Some(Resource::Slots),
            Self::ListMyCaseHistories => Some(Resource::CaseHistories),
            Self::Login
            | Self::Register
            | Self::Logout
            | Self::UpdateProfile
            | Self::SendInvite
            | Self::BookAppointment
            | Self::UpdateAppointmentStatus
            | Self::CancelAppointment => None,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of one dispatched operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId {
    pub kind: OperationKind,
    pub seq: u64,
}

/// Issues monotonic sequence numbers and remembers the latest one per
/// resource (generation counter).
#[derive(Debug, Default)]
pub struct RequestTracker {
    next_seq: u64,
    latest: HashMap<Resource, u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, kind: OperationKind) -> RequestId {
        self.next_seq += 1;
        let seq = self.next_seq;
        if let Some(resource) = kind.resource() {
            self.latest.insert(resource, seq);
        }
        RequestId { kind, seq }
    }

    /// Whether `id` is still the newest request for its resource.
    /// Mutations are always current.
    pub fn is_current(&self, id: RequestId) -> bool {
        match id.kind.resource() {
            Some(resource) => self.latest.get(&resource).map_or(true, |&seq| seq == id.seq),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_fetch_supersedes_older() {
        let mut tracker = RequestTracker::new();
        let week = tracker.issue(OperationKind::FetchAvailableSlots);
        let month = tracker.issue(OperationKind::FetchAvailableSlots);
        assert!(!tracker.is_current(week));
        assert!(tracker.is_current(month));
    }

    #[test]
    fn appointment_lists_share_a_resource() {
        let mut tracker = RequestTracker::new();
        let mine = tracker.issue(OperationKind::ListMyAppointments);
        let doctor = tracker.issue(OperationKind::ListDoctorAppointments);
        assert!(!tracker.is_current(mine));
        assert!(tracker.is_current(doctor));
    }

    #[test]
    fn mutations_are_never_stale() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue(OperationKind::BookAppointment);
        let _second = tracker.issue(OperationKind::BookAppointment);
        assert!(tracker.is_current(first));
    }

    #[test]
    fn different_resources_do_not_interfere() {
        let mut tracker = RequestTracker::new();
        let doctors = tracker.issue(OperationKind::ListDoctors);
        let _session = tracker.issue(OperationKind::CheckSession);
        assert!(tracker.is_current(doctors));
    }

    #[test]
    fn every_kind_has_a_fallback() {
        use OperationKind::*;
        for kind in [
            CheckSession, Login, Register, Logout, UpdateProfile, SendInvite, ListDoctors,
            ListPatients, ListMyAppointments, ListDoctorAppointments, FetchAvailableSlots,
            BookAppointment, UpdateAppointmentStatus, CancelAppointment, ListMyCaseHistories,
        ] {
            assert!(!kind.fallback_message().is_empty(), "{kind}");
        }
    }
}
