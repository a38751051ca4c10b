use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::Role;

/// Login account embedded in profile documents (`userId`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Reference to an account: either populated or a bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountRef {
    Populated(Account),
    Id(String),
}

impl AccountRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Populated(account) => &account.id,
            Self::Id(id) => id,
        }
    }

    pub fn account(&self) -> Option<&Account> {
        match self {
            Self::Populated(account) => Some(account),
            Self::Id(_) => None,
        }
    }
}

/// The logged-in user as returned by the session and profile endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<AccountRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
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

impl UserProfile {
    /// Display name, falling back to the embedded account name.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        self.user_id
            .as_ref()
            .and_then(AccountRef::account)
            .and_then(|a| a.name.as_deref())
            .unwrap_or("")
    }

    /// A profile counts as complete once contact and demographic fields are set.
    pub fn is_profile_complete(&self) -> bool {
        [&self.phone, &self.gender, &self.dob, &self.address]
            .iter()
            .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// Resolve the session role from a user profile.
///
/// Precedence: nested `userId.role`, then top-level `role`, else `None`.
/// Unrecognised role strings resolve to `None`.
pub fn derive_role(user: &UserProfile) -> Option<Role> {
    let nested = user
        .user_id
        .as_ref()
        .and_then(AccountRef::account)
        .and_then(|account| account.role.as_deref());

    let raw = nested.or(user.role.as_deref())?;
    match raw.trim().to_ascii_lowercase().parse::<Role>() {
        Ok(role) => Some(role),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unrecognised role on user profile");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(value: Value) -> UserProfile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn nested_role_wins_over_top_level() {
        let u = user(json!({
            "_id": "p1",
            "role": "staff",
            "userId": { "_id": "u1", "role": "patient" }
        }));
        assert_eq!(derive_role(&u), Some(Role::Patient));
    }

    #[test]
    fn top_level_role_used_when_nested_missing() {
        let u = user(json!({ "_id": "u1", "name": "Dr. Ade", "role": "doctor" }));
        assert_eq!(derive_role(&u), Some(Role::Doctor));

        // userId present but unpopulated
        let u = user(json!({ "_id": "u1", "role": "staff", "userId": "abc123" }));
        assert_eq!(derive_role(&u), Some(Role::Staff));
    }

    #[test]
    fn no_role_anywhere_is_none() {
        let u = user(json!({ "_id": "u1", "name": "Anon" }));
        assert_eq!(derive_role(&u), None);
    }

    #[test]
    fn unknown_role_is_none() {
        let u = user(json!({ "_id": "u1", "role": "superuser" }));
        assert_eq!(derive_role(&u), None);
    }

    #[test]
    fn role_match_ignores_case() {
        let u = user(json!({ "_id": "u1", "role": "Doctor " }));
        assert_eq!(derive_role(&u), Some(Role::Doctor));
    }

    #[test]
    fn unknown_fields_are_kept() {
        let u = user(json!({ "_id": "u1", "bloodGroup": "O+" }));
        assert_eq!(u.extra.get("bloodGroup"), Some(&json!("O+")));
    }

    #[test]
    fn display_name_falls_back_to_account() {
        let u = user(json!({ "_id": "p1", "userId": { "_id": "u1", "name": "Kemi" } }));
        assert_eq!(u.display_name(), "Kemi");
    }

    #[test]
    fn profile_completeness_requires_all_fields() {
        let mut u = user(json!({
            "_id": "p1", "phone": "0800", "gender": "female", "dob": "1990-01-01"
        }));
        assert!(!u.is_profile_complete());
        u.address = Some("12 Marina Rd".into());
        assert!(u.is_profile_complete());
    }
}
