use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_GROUP: &str = "Other";

/// One contact's stored attributes. The name is the key in
/// [`ContactStore`](crate::contacts::ContactStore) and is not repeated here.
///
/// Reading a record never fails: missing or `null` fields take defaults,
/// scalars of the wrong type are kept as their JSON text, and keys this
/// version does not know about are carried in `extra` and written back on
/// save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    pub group: String,

    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,

    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_group() -> String {
    DEFAULT_GROUP.to_string()
}

impl Contact {
    /// Builds a record stamped with `now`. Inputs are expected to be validated.
    pub fn new(
        phone: String,
        email: Option<String>,
        address: Option<String>,
        group: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            phone,
            email,
            address,
            group,
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        }
    }

    fn from_value(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                tracing::warn!(record = %other, "contact record is not an object, using defaults");
                Map::new()
            }
        };
        let phone = text(take(&mut fields, &["phone"])).unwrap_or_default();
        let email = text(take(&mut fields, &["email"]));
        let address = text(take(&mut fields, &["address"]));
        let group = text(take(&mut fields, &["group"])).unwrap_or_else(default_group);
        let created_at = time(take(&mut fields, &["createdAt", "created_at"]));
        let updated_at = time(take(&mut fields, &["updatedAt", "updated_at"]));
        Self {
            phone,
            email,
            address,
            group,
            created_at,
            updated_at,
            extra: fields,
        }
    }
}

impl<'de> Deserialize<'de> for Contact {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Value::deserialize(d).map(Contact::from_value)
    }
}

/// Removes every key in `keys`, returning the first one present.
fn take(fields: &mut Map<String, Value>, keys: &[&str]) -> Value {
    let mut found = Value::Null;
    for key in keys {
        if let Some(value) = fields.remove(*key) {
            if found.is_null() {
                found = value;
            }
        }
    }
    found
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn time(value: Value) -> DateTime<Utc> {
    let parsed = match &value {
        Value::String(raw) => timestamp::parse(raw),
        _ => None,
    };
    parsed.unwrap_or_else(|| {
        if !value.is_null() {
            tracing::warn!(%value, "unreadable timestamp in contact record, using epoch");
        }
        DateTime::default()
    })
}

/// Record fields as typed by a user, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub group: Option<String>,
}

impl NewContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Fields to change on an existing record. `None` and blank values are skipped.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub group: Option<String>,
}

impl ContactUpdate {
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Phone,
    Email,
    Address,
    Group,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
            Field::Group => "group",
        };
        f.write_str(name)
    }
}

/// Timestamps are written as RFC 3339 UTC. On read, naive ISO-8601 values
/// (no offset) are accepted too and taken as local time.
mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339())
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
