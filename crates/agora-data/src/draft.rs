use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::members::restore_scalar;
use crate::Member;

/// Editable fields of the own profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Username,
    Email,
    Interest,
    Year,
    University,
    Gender,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Name,
        ProfileField::Username,
        ProfileField::Email,
        ProfileField::Interest,
        ProfileField::Year,
        ProfileField::University,
        ProfileField::Gender,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Username => "username",
            ProfileField::Email => "email",
            ProfileField::Interest => "interest",
            ProfileField::Year => "year",
            ProfileField::University => "university",
            ProfileField::Gender => "gender",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Username => "Username",
            ProfileField::Email => "Email",
            ProfileField::Interest => "Interest",
            ProfileField::Year => "Year",
            ProfileField::University => "University",
            ProfileField::Gender => "Gender",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown profile field: {}", s))
    }
}

/// Pending edits of the own profile.
///
/// Seeded from the session member. The identifier is read only and
/// the password stays unset unless a new one is chosen. Attributes
/// the form does not edit are carried along, so serializing the draft
/// yields the full record for a replace. Scalars keep the JSON type
/// the store sent unless they were edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub interest: String,
    pub year: String,
    pub university: String,
    pub gender: String,
    education: String,
    age: String,
    password: Option<String>,
    extra: BTreeMap<String, Value>,
    source: BTreeMap<String, Value>,
}

impl Serialize for ProfileDraft {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut record: Map<String, Value> = self
            .extra
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let scalars = [
            ("id", &self.id),
            ("username", &self.username),
            ("email", &self.email),
            ("name", &self.name),
            ("gender", &self.gender),
            ("education", &self.education),
            ("interest", &self.interest),
            ("university", &self.university),
            ("year", &self.year),
            ("age", &self.age),
        ];
        for (key, value) in scalars {
            restore_scalar(&mut record, key, value, self.source.get(key));
        }
        if let Some(password) = &self.password {
            record.insert("password".to_string(), Value::String(password.clone()));
        }
        record.serialize(serializer)
    }
}

impl ProfileDraft {
    pub fn from_member(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            username: member.username.clone(),
            email: member.email.clone(),
            interest: member.interest.clone(),
            year: member.year.clone(),
            university: member.university.clone(),
            gender: member.gender.clone(),
            education: member.education.clone(),
            age: member.age.clone(),
            password: None,
            extra: member.extra.clone(),
            source: member.source.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Username => &self.username,
            ProfileField::Email => &self.email,
            ProfileField::Interest => &self.interest,
            ProfileField::Year => &self.year,
            ProfileField::University => &self.university,
            ProfileField::Gender => &self.gender,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Username => self.username = value,
            ProfileField::Email => self.email = value,
            ProfileField::Interest => self.interest = value,
            ProfileField::Year => self.year = value,
            ProfileField::University => self.university = value,
            ProfileField::Gender => self.gender = value,
        }
    }

    /// Submit a new password with the next save.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Some(password.into());
    }

    pub fn changes_password(&self) -> bool {
        self.password.is_some()
    }

    /// Fields whose value differs from `member`.
    pub fn changed_fields(&self, member: &Member) -> Vec<ProfileField> {
        let seed = ProfileDraft::from_member(member);
        ProfileField::ALL
            .into_iter()
            .filter(|field| self.get(*field) != seed.get(*field))
            .collect()
    }
}
