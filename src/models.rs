//! Client-side view models of clinic backend resources.

pub mod appointment;
pub mod case_history;
pub mod doctor;
pub mod enums;
pub mod patient;
pub mod slot;
pub mod user;

pub use appointment::{
    AppointmentRecord, BookingRequest, CompletionDetails, PartyRef, PartySummary, StatusUpdate,
    Transition,
};
pub use case_history::CaseHistoryRecord;
pub use doctor::DoctorProfile;
pub use enums::{AppointmentStatus, ModelError, Role, SlotRange, StatusTag};
pub use patient::PatientProfile;
pub use slot::{offers_slot, SlotOffer};
pub use user::{derive_role, Account, AccountRef, UserProfile};
