//! Appointment slice: the user's appointment list and the slot offer for
//! the doctor being booked.

use super::action::{apply_phase, impl_async_slice, AsyncAction, AsyncSlice};
use super::request::RequestId;
use crate::models::{AppointmentRecord, AppointmentStatus, SlotOffer, SlotRange};

/// Slot offer together with the query that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotsPayload {
    pub doctor_id: String,
    pub range: SlotRange,
    pub offers: Vec<SlotOffer>,
}

/// In-place status edit of one appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub appointment_id: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentAction {
    ListMine(AsyncAction<Vec<AppointmentRecord>>),
    ListForDoctor(AsyncAction<Vec<AppointmentRecord>>),
    FetchSlots(AsyncAction<SlotsPayload>),
    Book(AsyncAction<AppointmentRecord>),
    UpdateStatus(AsyncAction<StatusChange>),
    Cancel(AsyncAction<StatusChange>),
    ClearSlots,
    ClearMessages,
}

impl AppointmentAction {
    pub fn settles(&self) -> Option<RequestId> {
        match self {
            Self::ListMine(a) | Self::ListForDoctor(a) => a.settles(),
            Self::FetchSlots(a) => a.settles(),
            Self::Book(a) => a.settles(),
            Self::UpdateStatus(a) | Self::Cancel(a) => a.settles(),
            Self::ClearSlots | Self::ClearMessages => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentState {
    pub appointments: Vec<AppointmentRecord>,
    pub slots: Vec<SlotOffer>,
    /// Doctor and range of the current `slots`.
    pub slots_query: Option<(String, SlotRange)>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl_async_slice!(AppointmentState);

impl AppointmentState {
    pub fn reduce(&mut self, action: AppointmentAction) {
        match action {
            AppointmentAction::ListMine(a) | AppointmentAction::ListForDoctor(a) => {
                apply_phase(self, a.phase, |s, list| s.appointments = list)
            }
            AppointmentAction::FetchSlots(a) => apply_phase(self, a.phase, |s, payload| {
                s.slots = payload.offers;
                s.slots_query = Some((payload.doctor_id, payload.range));
            }),
            AppointmentAction::Book(a) => apply_phase(self, a.phase, |s, record| {
                s.appointments.push(record);
                s.success = Some("Appointment booked successfully".into());
            }),
            AppointmentAction::UpdateStatus(a) => apply_phase(self, a.phase, |s, change| {
                s.patch_status(&change);
                s.success = Some("Appointment status updated".into());
            }),
            AppointmentAction::Cancel(a) => apply_phase(self, a.phase, |s, change| {
                s.patch_status(&change);
                s.success = Some("Appointment cancelled".into());
            }),
            AppointmentAction::ClearSlots => {
                self.slots.clear();
                self.slots_query = None;
            }
            AppointmentAction::ClearMessages => self.clear_messages(),
        }
    }

    /// Status is the only field ever edited in place; unknown ids are ignored.
    fn patch_status(&mut self, change: &StatusChange) {
        if change.appointment_id.is_empty() {
            tracing::debug!("Status change without an appointment id");
            return;
        }
        match self
            .appointments
            .iter_mut()
            .find(|a| a.id == change.appointment_id)
        {
            Some(record) => record.status = change.status,
            None => tracing::debug!(
                appointment_id = %change.appointment_id,
                "Status change for appointment not in the loaded list"
            ),
        }
    }

    pub fn appointment(&self, appointment_id: &str) -> Option<&AppointmentRecord> {
        self.appointments.iter().find(|a| a.id == appointment_id)
    }
}
