//! Write-side inputs for user create/update calls.
//!
//! # Responsibility
//! - Define the JSON bodies sent to `POST /api/users` and `PUT /api/users/{id}`.
//! - Normalize comma-separated hobby input from forms.
//!
//! # Invariants
//! - `age` is validated by the form collaborator; this layer does not re-check it.
//! - `UserPatch` serializes only the fields that were provided.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

static HOBBY_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid hobby separator regex"));

/// Full user input for create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInput {
    pub username: String,
    pub age: u32,
    pub hobbies: Vec<String>,
}

impl UserInput {
    pub fn new(username: impl Into<String>, age: u32, hobbies: Vec<String>) -> Self {
        Self {
            username: username.into(),
            age,
            hobbies,
        }
    }

    /// Builds an input from raw form fields, splitting the hobby text.
    pub fn from_form(username: &str, age: u32, hobbies: &str) -> Self {
        Self::new(username.trim(), age, parse_hobby_list(hobbies))
    }
}

/// Partial user input for update. `None` fields are left untouched remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<Vec<String>>,
}

impl UserPatch {
    /// Patch that replaces only the hobby set.
    pub fn hobbies(hobbies: Vec<String>) -> Self {
        Self {
            hobbies: Some(hobbies),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.age.is_none() && self.hobbies.is_none()
    }
}

/// Splits comma-separated hobby text.
///
/// Entries are trimmed, blanks dropped, and repeats removed keeping the first
/// occurrence.
pub fn parse_hobby_list(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    HOBBY_SEPARATOR_RE
        .split(raw.trim())
        .map(str::trim)
        .filter(|hobby| !hobby.is_empty())
        .filter(|hobby| seen.insert(hobby.to_string()))
        .map(str::to_string)
        .collect()
}
