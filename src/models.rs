// Data shapes exchanged with the remote API. Records are kept as the JSON
// object we received, with no type checks on individual fields: the
// service is not ours, so a missing field prints a placeholder and a field
// of an unexpected type prints as whatever value it holds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Printed in place of any missing field.
pub const PLACEHOLDER: &str = "N/A";

/// Text for a field as shown in the report. Strings print bare, other
/// values print as JSON, absent or `null` fields print the placeholder.
fn display(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(PLACEHOLDER),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// A user record as returned by `GET {users_url}/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

impl User {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// An empty object carries nothing to report.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn display_name(&self) -> Cow<'_, str> {
        display(self.0.get("name"))
    }

    pub fn display_email(&self) -> Cow<'_, str> {
        display(self.0.get("email"))
    }

    /// `address.city`, or the placeholder when either level is missing or
    /// `address` is not an object.
    pub fn display_city(&self) -> Cow<'_, str> {
        display(self.0.get("address").and_then(|a| a.get("city")))
    }
}

impl From<Map<String, Value>> for User {
    fn from(fields: Map<String, Value>) -> Self {
        User(fields)
    }
}

/// One entry of `GET {posts_url}?userId={id}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Post(Map<String, Value>);

impl Post {
    /// Any list element becomes a post; non-objects carry no fields.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Post(fields),
            _ => Post::default(),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn user_id(&self) -> Option<&Value> {
        self.0.get("userId")
    }

    pub fn display_title(&self) -> Cow<'_, str> {
        display(self.0.get("title"))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseUserIdError {
    #[error("empty input")]
    Empty,
    #[error("{0:?} is not an integer")]
    NotAnInteger(String),
}

/// The integer typed at the prompt, kept in canonical decimal form.
///
/// There is no range check: negative and arbitrarily large values are
/// valid ids and are sent to the API as typed (the API simply answers
/// 404). Storing the digits instead of a fixed-width integer means no
/// input that looks like an integer is ever rejected for overflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(id.to_string())
    }
}

impl FromStr for UserId {
    type Err = ParseUserIdError;

    /// Accepts surrounding whitespace, an optional `+`/`-` sign and ASCII
    /// digits. `+7`, `007` and `7` are the same id; `-0` is `0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseUserIdError::Empty);
        }
        let (negative, digits) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseUserIdError::NotAnInteger(trimmed.to_string()));
        }
        let significant = digits.trim_start_matches('0');
        let canonical = match (significant.is_empty(), negative) {
            (true, _) => "0".to_string(),
            (false, true) => format!("-{}", significant),
            (false, false) => significant.to_string(),
        };
        Ok(UserId(canonical))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
