use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::AccountRef;

/// Patient record as listed for staff management views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<AccountRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PatientProfile {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| {
                self.user_id
                    .as_ref()
                    .and_then(AccountRef::account)
                    .and_then(|a| a.name.as_deref())
            })
            .unwrap_or("")
    }
}
