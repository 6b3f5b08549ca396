//! Friendship edge model.
//!
//! # Invariants
//! - An edge is only meaningful while both endpoints exist in the same
//!   snapshot; see `GraphState::renderable_friendships`.
//! - Unlink is addressed by the endpoint pair, never by `id`.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Edge identifier assigned by the remote store. Not stable across refetches.
pub type FriendshipId = String;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Friendship {
    pub id: FriendshipId,
    pub source: UserId,
    pub target: UserId,
}

impl Friendship {
    pub fn new(
        id: impl Into<FriendshipId>,
        source: impl Into<UserId>,
        target: impl Into<UserId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns `(source, target)` in edge order.
    pub fn endpoints(&self) -> (&str, &str) {
        (self.source.as_str(), self.target.as_str())
    }

    pub fn touches(&self, user_id: &str) -> bool {
        self.source == user_id || self.target == user_id
    }
}
