use super::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone, Debug)]
pub struct User {
    pub id: String,
    pub phone_number: Option<String>,
    pub sms_opt_in: bool,
}

/// User as delivered by the record store. `"Mobile Number"` is the API
/// property name of the phone field; a missing or false opt-in toggle
/// excludes the user from every send.
#[derive(Deserialize, Debug)]
pub struct RawUser {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, rename = "_id")]
    pub legacy_id: Option<RecordId>,
    #[serde(
        default,
        rename = "Mobile Number",
        alias = "phone_number",
        alias = "phone"
    )]
    pub phone_number: Option<String>,
    #[serde(default, rename = "sms_opt_in", alias = "smsOptIn")]
    pub sms_opt_in: Option<bool>,
}

impl RawUser {
    pub fn into_user(self) -> Option<User> {
        let id = self.id.or(self.legacy_id)?.into_string();
        Some(User {
            id,
            phone_number: self.phone_number,
            sms_opt_in: self.sms_opt_in.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_opt_in_means_excluded() {
        let raw: RawUser =
            serde_json::from_value(json!({ "id": 1, "Mobile Number": "5551234567" })).unwrap();
        let user = raw.into_user().unwrap();
        assert!(!user.sms_opt_in);
        assert_eq!(user.phone_number.as_deref(), Some("5551234567"));
    }

    #[test]
    fn accepts_alias_keys() {
        let raw: RawUser = serde_json::from_value(json!({
            "id": "u1",
            "phone": "5551234567",
            "smsOptIn": true
        }))
        .unwrap();
        let user = raw.into_user().unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.sms_opt_in);
    }
}
