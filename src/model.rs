use crate::coerce::{coerce_flag, coerce_text, first_text};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity details as found in the payload, before resolution. All
/// fields are trimmed text; empty means absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialFields {
    pub platform: String,
    pub username: String,
    pub uid: String,
    pub url: String,
}

impl SocialFields {
    pub fn is_empty(&self) -> bool {
        self.platform.is_empty()
            && self.username.is_empty()
            && self.uid.is_empty()
            && self.url.is_empty()
    }
}

impl From<&SocialIdentity> for SocialFields {
    fn from(id: &SocialIdentity) -> Self {
        SocialFields {
            platform: id.platform.clone(),
            username: id.username.clone(),
            uid: id.uid.clone(),
            url: id.url.clone(),
        }
    }
}

/// The shapes a nested `social` field arrives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSocial {
    Absent,
    /// A bare string naming only the platform.
    Label(String),
    Fields(SocialFields),
}

impl RawSocial {
    pub fn from_value(value: Option<&Value>) -> RawSocial {
        match value {
            Some(Value::String(s)) => RawSocial::Label(s.trim().to_string()),
            Some(obj) if obj.is_object() => RawSocial::Fields(SocialFields {
                platform: first_text(obj, &["platform", "network", "name"]),
                username: first_text(obj, &["username", "handle"]),
                uid: first_text(obj, &["uid"]),
                url: first_text(obj, &["url", "link"]),
            }),
            _ => RawSocial::Absent,
        }
    }
}

/// One untrusted input record, read field by field with no failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDonorRecord {
    pub name: String,
    pub amount: Option<Value>,
    pub date: String,
    pub avatar: String,
    pub anonymous: bool,
    pub social: RawSocial,
    /// Flat `type` / `username` / `uid` / `social_link` fields.
    pub legacy: SocialFields,
}

impl RawDonorRecord {
    pub fn from_value(record: &Value) -> RawDonorRecord {
        RawDonorRecord {
            name: coerce_text(record.get("name")),
            amount: record.get("amount").cloned(),
            date: coerce_text(record.get("date")),
            avatar: coerce_text(record.get("avatar")),
            anonymous: ["anonymous", "isAnonymous", "is_anonymous"]
                .iter()
                .any(|k| coerce_flag(record.get(*k))),
            social: RawSocial::from_value(record.get("social")),
            legacy: SocialFields {
                platform: coerce_text(record.get("type")),
                username: coerce_text(record.get("username")),
                uid: coerce_text(record.get("uid")),
                url: coerce_text(record.get("social_link")),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialIdentity {
    pub platform: String,
    pub uid: String,
    pub username: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub name: String,
    pub amount: u64,
    pub avatar: String,
    pub is_anonymous: bool,
    pub social: Option<SocialIdentity>,
    pub rank: usize,
    pub date: String,
}
