//! Session state and its transition function.
//!
//! # Invariants
//! - Node and edge collections are only ever replaced together, from one
//!   snapshot.
//! - Nodes in state always carry a grid position.
//! - `is_mutating()` is true while at least one write is in flight.

use crate::model::friendship::Friendship;
use crate::model::user::{UserId, UserNode};
use crate::store::action::GraphAction;
use crate::view::layout::assign_grid_positions;

/// Client-side snapshot of the graph view.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphState {
    users: Vec<UserNode>,
    friendships: Vec<Friendship>,
    loading: bool,
    mutations_in_flight: u32,
    selected_user_id: Option<UserId>,
    error: Option<String>,
}

impl Default for GraphState {
    /// Empty graph, loading until the first fetch settles.
    fn default() -> Self {
        Self {
            users: Vec::new(),
            friendships: Vec::new(),
            loading: true,
            mutations_in_flight: 0,
            selected_user_id: None,
            error: None,
        }
    }
}

impl GraphState {
    /// Applies one transition in place.
    pub fn apply(&mut self, action: GraphAction) {
        match action {
            GraphAction::FetchStart => {
                self.loading = true;
                self.error = None;
            }
            GraphAction::FetchSuccess(snapshot) => {
                self.users = assign_grid_positions(snapshot.users);
                self.friendships = snapshot.friendships;
                self.loading = false;
            }
            GraphAction::FetchError(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            GraphAction::MutationStart => {
                self.mutations_in_flight = self.mutations_in_flight.saturating_add(1);
            }
            GraphAction::MutationEnd => {
                self.mutations_in_flight = self.mutations_in_flight.saturating_sub(1);
            }
            GraphAction::Select(user_id) => {
                self.selected_user_id = user_id;
            }
        }
    }

    /// Consuming form of [`GraphState::apply`].
    pub fn reduce(mut self, action: GraphAction) -> Self {
        self.apply(action);
        self
    }

    /// Laid-out nodes in server response order.
    pub fn users(&self) -> &[UserNode] {
        &self.users
    }

    pub fn friendships(&self) -> &[Friendship] {
        &self.friendships
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_mutating(&self) -> bool {
        self.mutations_in_flight > 0
    }

    pub fn mutations_in_flight(&self) -> u32 {
        self.mutations_in_flight
    }

    pub fn selected_user_id(&self) -> Option<&str> {
        self.selected_user_id.as_deref()
    }

    /// Last fetch error, cleared by the next fetch start.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn user(&self, user_id: &str) -> Option<&UserNode> {
        self.users.iter().find(|user| user.id == user_id)
    }

    /// Selected node, or `None` when nothing is selected or the id is stale.
    pub fn selected_user(&self) -> Option<&UserNode> {
        self.selected_user_id().and_then(|id| self.user(id))
    }

    /// Edges whose endpoints both exist in the current node collection.
    pub fn renderable_friendships(&self) -> impl Iterator<Item = &Friendship> + '_ {
        self.friendships
            .iter()
            .filter(|edge| self.user(&edge.source).is_some() && self.user(&edge.target).is_some())
    }

    /// Maps a drawing-surface edge id back to the `(source, target)` pair
    /// the remote store addresses friendships by.
    pub fn friendship_endpoints(&self, friendship_id: &str) -> Option<(UserId, UserId)> {
        self.friendships
            .iter()
            .find(|edge| edge.id == friendship_id)
            .map(|edge| (edge.source.clone(), edge.target.clone()))
    }
}
