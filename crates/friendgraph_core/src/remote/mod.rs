//! Remote graph store contract.
//!
//! # Responsibility
//! - Define the request/response operations the view engine depends on.
//! - Keep transport details (HTTP, JSON error bodies) out of the service layer.
//!
//! # Invariants
//! - `fetch_graph` returns the raw body; shape validation happens in
//!   `GraphSnapshot::from_value` so malformed payloads are never coerced.
//! - Request timeouts are the implementation's responsibility.

mod error;
pub mod http;

pub use error::{RemoteError, RemoteResult};

use crate::model::input::{UserInput, UserPatch};
use serde::Deserialize;
use serde_json::Value;

/// User record echoed back by create/update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteUser {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub username: String,
}

/// Operations offered by the remote graph store.
///
/// Calls are awaited on the session's single thread; implementations need not
/// be `Send`.
#[allow(async_fn_in_trait)]
pub trait GraphRemote {
    /// Fetches the full graph as `{nodes, edges}`.
    async fn fetch_graph(&self) -> RemoteResult<Value>;
    async fn create_user(&self, input: &UserInput) -> RemoteResult<RemoteUser>;
    async fn update_user(&self, user_id: &str, patch: &UserPatch) -> RemoteResult<RemoteUser>;
    async fn delete_user(&self, user_id: &str) -> RemoteResult<()>;
    /// Creates a friendship from `user_id` to `friend_id`.
    async fn link_users(&self, user_id: &str, friend_id: &str) -> RemoteResult<()>;
    /// Removes the friendship addressed by its endpoint pair.
    async fn unlink_users(&self, user_id: &str, friend_id: &str) -> RemoteResult<()>;
}
