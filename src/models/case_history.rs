use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::appointment::PartyRef;

/// Visit outcome recorded by the doctor when an appointment is completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseHistoryRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(rename = "appointmentId", alias = "appointment", default, skip_serializing_if = "Option::is_none")]
    pub appointment: Option<PartyRef>,
    #[serde(rename = "doctorId", alias = "doctor", default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<PartyRef>,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CaseHistoryRecord {
    pub fn appointment_id(&self) -> Option<&str> {
        self.appointment.as_ref().map(PartyRef::id)
    }
}
