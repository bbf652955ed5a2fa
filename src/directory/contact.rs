use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use url::form_urlencoded;

use crate::{
    Error,
    core::Result,
};

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/initials/svg";

/// Server-assigned contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i32);

impl ContactId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for ContactId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl FromStr for ContactId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim().parse::<i32>().map(Self).map_err(|e| {
            Error::Argument(format!("Invalid contact id {}: {}", s, e))
        })
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    #[serde(rename = "number")]
    number: String,
}

impl Phone {
    pub fn new(number: &str) -> Self {
        Self { number: number.to_string() }
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

pub struct ContactBuilder {
    id          : ContactId,
    first_name  : Option<String>,
    last_name   : Option<String>,
    created_at  : Option<String>,
    phones      : Vec<Phone>,
}

impl ContactBuilder {
    pub fn new(id: ContactId) -> Self {
        Self {
            id,
            first_name  : None,
            last_name   : None,
            created_at  : None,
            phones      : Vec::new(),
        }
    }

    pub fn with_first_name(&mut self, name: &str) -> &mut Self {
        self.first_name = Some(name.to_string());
        self
    }

    pub fn with_last_name(&mut self, name: &str) -> &mut Self {
        self.last_name = Some(name.to_string());
        self
    }

    pub fn with_created_at(&mut self, created_at: &str) -> &mut Self {
        self.created_at = Some(created_at.to_string());
        self
    }

    pub fn with_phone(&mut self, number: &str) -> &mut Self {
        self.phones.push(Phone::new(number));
        self
    }

    pub fn with_phones(&mut self, numbers: &[&str]) -> &mut Self {
        self.phones.extend(numbers.iter().map(|v| Phone::new(v)));
        self
    }

    pub fn build(&mut self) -> Contact {
        Contact {
            id          : self.id,
            first_name  : self.first_name.take().unwrap_or_default(),
            last_name   : self.last_name.take().unwrap_or_default(),
            created_at  : self.created_at.take(),
            phones      : std::mem::take(&mut self.phones),
        }
    }
}

/// A contact row as returned by the directory service. Phones keep the
/// order the service returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "id")]
    id          : ContactId,
    #[serde(rename = "first_name")]
    first_name  : String,
    #[serde(rename = "last_name")]
    last_name   : String,
    #[serde(rename = "created_at", default, skip_serializing_if = "Option::is_none")]
    created_at  : Option<String>,
    #[serde(rename = "phones", default)]
    phones      : Vec<Phone>,
}

impl Contact {
    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn phone_numbers(&self) -> Vec<&str> {
        self.phones.iter().map(|v| v.number()).collect()
    }

    /// Initials avatar seeded with the first name.
    pub fn avatar_url(&self) -> String {
        let seed: String = form_urlencoded::byte_serialize(self.first_name.as_bytes()).collect();
        format!("{}?seed={}", AVATAR_BASE_URL, seed)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.id, self.full_name())?;
        if !self.phones.is_empty() {
            write!(f, " ({})", self.phone_numbers().join(", "))?;
        }
        Ok(())
    }
}
