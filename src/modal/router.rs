//! Resolves the global modal slot into the one typed view to render.

use crate::forms::{CompletionForm, InviteForm, ProfileForm};
use crate::models::{AppointmentRecord, CaseHistoryRecord, DoctorProfile, PatientProfile};
use crate::store::{AuthState, ModalData, ModalState, ModalType};

/// The open modal with its payload checked against its tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalView {
    Booking { doctor: DoctorProfile },
    /// Prefilled from the session user when there is one.
    CompleteProfile { form: ProfileForm },
    Invite { form: InviteForm },
    CaseHistory { record: CaseHistoryRecord },
    CompleteAppointment {
        appointment: AppointmentRecord,
        form: CompletionForm,
    },
    PatientDetails { patient: PatientProfile },
    /// The tag needs a payload that is missing or of another kind.
    Unavailable(ModalType),
}

impl ModalView {
    pub fn modal_type(&self) -> ModalType {
        match self {
            Self::Booking { .. } => ModalType::BookingModal,
            Self::CompleteProfile { .. } => ModalType::CompleteProfile,
            Self::Invite { .. } => ModalType::InviteModal,
            Self::CaseHistory { .. } => ModalType::CaseHistory,
            Self::CompleteAppointment { .. } => ModalType::CompleteAppointment,
            Self::PatientDetails { .. } => ModalType::PatientDetails,
            Self::Unavailable(modal_type) => *modal_type,
        }
    }
}

pub struct ModalRouter;

impl ModalRouter {
    /// `None` when the slot is closed, whatever `modal_type` and
    /// `modal_data` still hold.
    pub fn resolve(modal: &ModalState, session: &AuthState) -> Option<ModalView> {
        let modal_type = modal.active()?;
        let data = modal.modal_data.as_ref();

        let view = match (modal_type, data) {
            (ModalType::InviteModal, _) => ModalView::Invite {
                form: InviteForm::default(),
            },
            (ModalType::CompleteProfile, _) => ModalView::CompleteProfile {
                form: session
                    .user
                    .as_ref()
                    .map(ProfileForm::from_user)
                    .unwrap_or_default(),
            },
            (ModalType::BookingModal, Some(ModalData::Doctor(doctor))) => ModalView::Booking {
                doctor: doctor.clone(),
            },
            (ModalType::CaseHistory, Some(ModalData::CaseHistory(record))) => {
                ModalView::CaseHistory {
                    record: record.clone(),
                }
            }
            (ModalType::CompleteAppointment, Some(ModalData::Appointment(appointment))) => {
                ModalView::CompleteAppointment {
                    appointment: appointment.clone(),
                    form: CompletionForm::default(),
                }
            }
            (ModalType::PatientDetails, Some(ModalData::Patient(patient))) => {
                ModalView::PatientDetails {
                    patient: patient.clone(),
                }
            }
            (modal_type, data) => {
                tracing::warn!(
                    modal = modal_type.as_str(),
                    has_data = data.is_some(),
                    "Modal opened without a matching payload"
                );
                ModalView::Unavailable(modal_type)
            }
        };
        Some(view)
    }
}
