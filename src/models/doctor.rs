use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::AccountRef;

/// Doctor directory entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<AccountRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_available() -> bool {
    true
}

impl DoctorProfile {
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
