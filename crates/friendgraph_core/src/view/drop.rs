//! Hobby drag-and-drop target resolution.
//!
//! # Responsibility
//! - Hit-test a flow-space point against node bounding boxes.
//! - Merge a dropped hobby into the target node's hobby set.
//!
//! # Invariants
//! - A box is the node's grid position plus its rendered size; unmeasured
//!   nodes have a zero-size box.
//! - Box edges are inclusive. With overlapping boxes the first node in
//!   collection order wins.
//! - A miss or an empty payload produces no plan; dropping never moves a node.

use crate::model::input::UserPatch;
use crate::model::user::{Position, UserId, UserNode};
use std::collections::HashMap;

/// Rendered node size reported by the drawing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned node box in flow space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBounds {
    pub origin: Position,
    pub size: Size,
}

impl NodeBounds {
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.size.height
    }
}

/// Box for `user` using its measured size, or zero when not yet measured.
pub fn node_bounds(user: &UserNode, measured: &HashMap<UserId, Size>) -> NodeBounds {
    NodeBounds {
        origin: user.position,
        size: measured.get(&user.id).copied().unwrap_or_default(),
    }
}

/// Finds the first node whose box contains `point`.
pub fn resolve_drop_target<'a>(
    point: Position,
    users: &'a [UserNode],
    measured: &HashMap<UserId, Size>,
) -> Option<&'a UserNode> {
    users
        .iter()
        .find(|user| node_bounds(user, measured).contains(point))
}

/// Set union of `existing` and `hobby`, keeping existing order.
pub fn merge_hobby(existing: &[String], hobby: &str) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(existing.len() + 1);
    for value in existing.iter().map(String::as_str).chain(std::iter::once(hobby)) {
        if !merged.iter().any(|kept| kept == value) {
            merged.push(value.to_string());
        }
    }
    merged
}

/// Update to submit for a resolved drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HobbyDrop {
    pub user_id: UserId,
    pub hobbies: Vec<String>,
}

impl HobbyDrop {
    pub fn into_patch(self) -> (UserId, UserPatch) {
        (self.user_id, UserPatch::hobbies(self.hobbies))
    }
}

/// Resolves a drop gesture into the update it should submit, if any.
pub fn plan_hobby_drop(
    users: &[UserNode],
    measured: &HashMap<UserId, Size>,
    point: Position,
    payload: Option<&str>,
) -> Option<HobbyDrop> {
    let hobby = payload.map(str::trim).filter(|value| !value.is_empty())?;
    let target = resolve_drop_target(point, users, measured)?;
    Some(HobbyDrop {
        user_id: target.id.clone(),
        hobbies: merge_hobby(&target.data.hobbies, hobby),
    })
}
