//! Global modal slot: which modal is open and the payload attached to it.

use serde::{Deserialize, Serialize};

use crate::models::{AppointmentRecord, CaseHistoryRecord, DoctorProfile, PatientProfile};

/// Tag selecting the one modal to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalType {
    BookingModal,
    CompleteProfile,
    InviteModal,
    CaseHistory,
    CompleteAppointment,
    PatientDetails,
}

impl ModalType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BookingModal => "bookingmodal",
            Self::CompleteProfile => "completeprofile",
            Self::InviteModal => "invitemodal",
            Self::CaseHistory => "casehistory",
            Self::CompleteAppointment => "completeappointment",
            Self::PatientDetails => "patientdetails",
        }
    }
}

/// Typed payload attached to the modal slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalData {
    Doctor(DoctorProfile),
    Patient(PatientProfile),
    Appointment(AppointmentRecord),
    CaseHistory(CaseHistoryRecord),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalAction {
    Open(ModalType),
    Close,
    /// Sets the payload without opening anything.
    AttachData(ModalData),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    pub is_open: bool,
    pub modal_type: Option<ModalType>,
    pub modal_data: Option<ModalData>,
}

impl ModalState {
    pub fn reduce(&mut self, action: ModalAction) {
        match action {
            ModalAction::Open(modal_type) => {
                self.is_open = true;
                self.modal_type = Some(modal_type);
            }
            ModalAction::Close => {
                self.is_open = false;
                self.modal_type = None;
            }
            ModalAction::AttachData(data) => self.modal_data = Some(data),
        }
    }

    /// The open modal's tag, or `None` when closed (stale tags are ignored).
    pub fn active(&self) -> Option<ModalType> {
        if self.is_open {
            self.modal_type
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close_resets_type() {
        let mut state = ModalState::default();
        state.reduce(ModalAction::Open(ModalType::InviteModal));
        assert_eq!(state.active(), Some(ModalType::InviteModal));
        state.reduce(ModalAction::Close);
        assert!(!state.is_open);
        assert_eq!(state.modal_type, None);
    }

    #[test]
    fn attach_data_never_opens() {
        let mut state = ModalState::default();
        state.reduce(ModalAction::AttachData(ModalData::Doctor(DoctorProfile::default())));
        assert!(!state.is_open);
        assert!(state.modal_data.is_some());

        state.reduce(ModalAction::Open(ModalType::BookingModal));
        state.reduce(ModalAction::AttachData(ModalData::Patient(PatientProfile::default())));
        assert!(state.is_open);
    }

    #[test]
    fn close_keeps_stale_data_but_shows_nothing() {
        let mut state = ModalState::default();
        state.reduce(ModalAction::AttachData(ModalData::Doctor(DoctorProfile::default())));
        state.reduce(ModalAction::Open(ModalType::BookingModal));
        state.reduce(ModalAction::Close);
        assert!(state.modal_data.is_some());
        assert_eq!(state.active(), None);
    }

    #[test]
    fn tags_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&ModalType::InviteModal).unwrap(),
            "\"invitemodal\""
        );
        assert_eq!(ModalType::CompleteAppointment.as_str(), "completeappointment");
    }
}
