//! Fetch payload validation.
//!
//! # Responsibility
//! - Turn the raw `GET /api/graph` body into a typed snapshot.
//! - Reject malformed shapes instead of treating them as an empty graph.
//!
//! # Invariants
//! - Both `nodes` and `edges` must be present and be arrays.
//! - One bad element rejects the whole payload; partial snapshots never reach
//!   the store.

use crate::model::friendship::Friendship;
use crate::model::user::UserNode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const NODES_FIELD: &str = "nodes";
const EDGES_FIELD: &str = "edges";

/// Malformed fetch payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Top-level body is not a JSON object.
    NotAnObject,
    /// Required collection field is absent.
    MissingField(&'static str),
    /// Collection field is present but not an array.
    NotASequence(&'static str),
    /// One collection element failed to decode.
    InvalidElement {
        field: &'static str,
        index: usize,
        reason: String,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "graph payload is not an object"),
            Self::MissingField(field) => write!(f, "graph payload is missing `{field}`"),
            Self::NotASequence(field) => write!(f, "graph payload field `{field}` is not a list"),
            Self::InvalidElement {
                field,
                index,
                reason,
            } => write!(f, "graph payload `{field}[{index}]` is invalid: {reason}"),
        }
    }
}

impl Error for SnapshotError {}

/// One complete, validated fetch response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    /// Nodes in server response order.
    pub users: Vec<UserNode>,
    pub friendships: Vec<Friendship>,
}

impl GraphSnapshot {
    pub fn new(users: Vec<UserNode>, friendships: Vec<Friendship>) -> Self {
        Self { users, friendships }
    }

    /// Validates and decodes a raw fetch body.
    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        let Value::Object(mut body) = value else {
            return Err(SnapshotError::NotAnObject);
        };

        let nodes = take_sequence(&mut body, NODES_FIELD)?;
        let edges = take_sequence(&mut body, EDGES_FIELD)?;

        Ok(Self {
            users: decode_elements(NODES_FIELD, nodes)?,
            friendships: decode_elements(EDGES_FIELD, edges)?,
        })
    }
}

fn take_sequence(
    body: &mut serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Vec<Value>, SnapshotError> {
    match body.remove(field) {
        None => Err(SnapshotError::MissingField(field)),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(SnapshotError::NotASequence(field)),
    }
}

fn decode_elements<T: DeserializeOwned>(
    field: &'static str,
    items: Vec<Value>,
) -> Result<Vec<T>, SnapshotError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|err| SnapshotError::InvalidElement {
                field,
                index,
                reason: err.to_string(),
            })
        })
        .collect()
}
