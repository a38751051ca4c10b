use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{AppointmentStatus, StatusTag};
use super::user::AccountRef;

/// Doctor or patient as embedded in an appointment (populated or bare id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyRef {
    Populated(PartySummary),
    Id(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<AccountRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

impl PartyRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Populated(party) => &party.id,
            Self::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Populated(party) => party.name.as_deref().or_else(|| {
                party
                    .user_id
                    .as_ref()
                    .and_then(AccountRef::account)
                    .and_then(|a| a.name.as_deref())
            }),
            Self::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(rename = "doctorId", alias = "doctor", default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<PartyRef>,
    #[serde(rename = "patientId", alias = "patient", default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<PartyRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppointmentRecord {
    /// Calendar date, accepting both `YYYY-MM-DD` and full ISO timestamps.
    pub fn date_value(&self) -> Option<NaiveDate> {
        let day = self.date.get(..10).unwrap_or(&self.date);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }

    /// Start time as a clock value. Accepts `9:00`, `09:00` and `9:00 AM`.
    pub fn start_value(&self) -> Option<NaiveTime> {
        let raw = self.start_time.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%I:%M %p"))
            .ok()
    }

    /// `"10:00 - 10:30"` style label used by slot offers.
    pub fn time_label(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }

    pub fn doctor_id(&self) -> Option<&str> {
        self.doctor.as_ref().map(PartyRef::id)
    }

    pub fn patient_id(&self) -> Option<&str> {
        self.patient.as_ref().map(PartyRef::id)
    }
}

/// Booking input for a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub doctor_id: String,
    pub date: String,
    /// Slot label, e.g. `"10:00 - 10:30"`.
    pub time: String,
    pub day: String,
}

impl BookingRequest {
    /// Split the slot label into start and end times.
    pub fn time_bounds(&self) -> Option<(&str, &str)> {
        let (start, end) = self.time.split_once('-')?;
        Some((start.trim(), end.trim()))
    }
}

/// Fields recorded when a visit is marked completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionDetails {
    pub diagnosis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
}

/// Status change requested by staff or doctor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    CheckIn,
    Completed(CompletionDetails),
    Booked,
}

impl StatusUpdate {
    pub fn tag(&self) -> StatusTag {
        match self {
            Self::CheckIn => StatusTag::CheckIn,
            Self::Completed(_) => StatusTag::Completed,
            Self::Booked => StatusTag::Booked,
        }
    }

    /// Request body for the status endpoint.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("status".into(), Value::String(self.tag().as_str().into()));
        if let Self::Completed(details) = self {
            if let Ok(Value::Object(fields)) = serde_json::to_value(details) {
                body.extend(fields);
            }
        }
        Value::Object(body)
    }
}

/// Classification of a status change against the forward lifecycle
/// `booked → checked in → completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Forward,
    Unchanged,
    /// Moves backwards in the lifecycle (e.g. completed → checked in).
    Correction,
    /// Leaves the cancelled state.
    FromCancelled,
}

impl AppointmentStatus {
    fn rank(self) -> Option<u8> {
        match self {
            Self::Booked => Some(0),
            Self::CheckedIn => Some(1),
            Self::Completed => Some(2),
            Self::Cancelled => None,
        }
    }

    pub fn transition(self, to: AppointmentStatus) -> Transition {
        if self == to {
            return Transition::Unchanged;
        }
        match (self.rank(), to.rank()) {
            (None, _) => Transition::FromCancelled,
            (Some(_), None) => Transition::Forward,
            (Some(from), Some(to)) if to > from => Transition::Forward,
            _ => Transition::Correction,
        }
    }

    /// Final states: nothing further is expected to happen to the visit.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}
