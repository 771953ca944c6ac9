use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Render a JSON value the way it is shown and searched:
/// strings without quotes, null as empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The store is not strict about scalar types, `year` may be
/// `2` or `"2"` and ids are numbers or strings depending on the backend.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(display_value(&value))
}

/// Scalar attributes of a user record this client reads and edits.
pub const SCALAR_KEYS: [&str; 10] = [
    "id",
    "username",
    "email",
    "name",
    "gender",
    "education",
    "interest",
    "university",
    "year",
    "age",
];

/// Write the scalar `key` back into `record`.
///
/// An unchanged value keeps the JSON the store sent, numbers stay
/// numbers. An edited value keeps a numeric type when it still parses
/// as a number. Attributes the store never sent are only written once
/// they have a value.
pub(crate) fn restore_scalar(
    record: &mut Map<String, Value>,
    key: &str,
    value: &str,
    original: Option<&Value>,
) {
    let restored = match original {
        Some(original) if display_value(original) == value => original.clone(),
        Some(Value::Number(_)) => match serde_json::from_str::<Value>(value.trim()) {
            Ok(number @ Value::Number(_)) => number,
            _ => Value::String(value.to_string()),
        },
        None if value.is_empty() => return,
        _ => Value::String(value.to_string()),
    };
    record.insert(key.to_string(), restored);
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberFilter {
    pub email: Option<String>,
}

/// A user record as held by the record store.
///
/// The password is accepted when deserializing but never serialized,
/// so a fetched record can not leak it into a session file or a
/// replace request. Attributes this client does not know about are
/// kept in `extra` and written back untouched. `source` remembers
/// the scalars as the store sent them, so serializing does not turn
/// `"age": 23` into `"age": "23"` or invent attributes the record
/// never had.
#[derive(Debug, Clone, Default)]
pub struct Member {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub name: String,
    pub gender: String,
    pub education: String,
    pub interest: String,
    pub university: String,
    pub year: String,
    pub age: String,
    pub extra: BTreeMap<String, Value>,
    pub source: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
struct MemberFields {
    #[serde(default, deserialize_with = "lenient_string")]
    id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    username: String,
    #[serde(default, deserialize_with = "lenient_string")]
    email: String,
    #[serde(default)]
    password: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    gender: String,
    #[serde(default, deserialize_with = "lenient_string")]
    education: String,
    #[serde(default, deserialize_with = "lenient_string")]
    interest: String,
    #[serde(default, deserialize_with = "lenient_string")]
    university: String,
    #[serde(default, deserialize_with = "lenient_string")]
    year: String,
    #[serde(default, deserialize_with = "lenient_string")]
    age: String,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl<'de> Deserialize<'de> for Member {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = Map::<String, Value>::deserialize(deserializer)?;
        let source = SCALAR_KEYS
            .iter()
            .filter_map(|key| record.get(*key).map(|value| (key.to_string(), value.clone())))
            .collect();
        let fields = MemberFields::deserialize(Value::Object(record)).map_err(D::Error::custom)?;
        Ok(Member {
            id: fields.id,
            username: fields.username,
            email: fields.email,
            password: fields.password,
            name: fields.name,
            gender: fields.gender,
            education: fields.education,
            interest: fields.interest,
            university: fields.university,
            year: fields.year,
            age: fields.age,
            extra: fields.extra,
            source,
        })
    }
}

impl Serialize for Member {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.record().serialize(serializer)
    }
}

/// Members are equal when they read the same, whatever JSON type
/// the store used for a scalar.
impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.scalars() == other.scalars()
            && self.password == other.password
            && self.extra == other.extra
    }
}

impl Member {
    /// The scalars in the order of `SCALAR_KEYS`.
    pub fn scalars(&self) -> [(&'static str, &str); 10] {
        [
            ("id", self.id.as_str()),
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("name", self.name.as_str()),
            ("gender", self.gender.as_str()),
            ("education", self.education.as_str()),
            ("interest", self.interest.as_str()),
            ("university", self.university.as_str()),
            ("year", self.year.as_str()),
            ("age", self.age.as_str()),
        ]
    }

    /// The record as JSON, without the password.
    pub fn record(&self) -> Map<String, Value> {
        let mut record: Map<String, Value> = self
            .extra
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        for (key, value) in self.scalars() {
            restore_scalar(&mut record, key, value, self.source.get(key));
        }
        record
    }

    /// Drop identifier and password for display in the roster.
    pub fn sanitize(self) -> RosterEntry {
        RosterEntry {
            username: self.username,
            email: self.email,
            name: self.name,
            gender: self.gender,
            education: self.education,
            interest: self.interest,
            university: self.university,
            year: self.year,
            age: self.age,
            extra: self.extra,
        }
    }

    /// The member without its password.
    pub fn public(mut self) -> Member {
        self.password = None;
        self
    }
}

/// Payload for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

pub const ROSTER_COLUMNS: [&str; 7] = [
    "Name",
    "Username",
    "Email",
    "Gender",
    "University",
    "Year",
    "Interest",
];

/// A member as listed in the roster. There is no identifier and
/// no password on this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterEntry {
    pub username: String,
    pub email: String,
    pub name: String,
    pub gender: String,
    pub education: String,
    pub interest: String,
    pub university: String,
    pub year: String,
    pub age: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RosterEntry {
    /// String form of every attribute of the entry.
    pub fn values(&self) -> Vec<String> {
        let mut values = vec![
            self.username.clone(),
            self.email.clone(),
            self.name.clone(),
            self.gender.clone(),
            self.education.clone(),
            self.interest.clone(),
            self.university.clone(),
            self.year.clone(),
            self.age.clone(),
        ];
        values.extend(self.extra.values().map(display_value));
        values
    }

    /// Cells in the order of `ROSTER_COLUMNS`.
    pub fn columns(&self) -> [&str; 7] {
        [
            &self.name,
            &self.username,
            &self.email,
            &self.gender,
            &self.university,
            &self.year,
            &self.interest,
        ]
    }
}
