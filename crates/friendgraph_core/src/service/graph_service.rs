//! Graph synchronization service.
//!
//! # Responsibility
//! - Run fetches and apply their outcome to the store.
//! - Run every write through start, remote call, full refetch, end.
//! - Map remote failures to the message shown in the notification.
//!
//! # Invariants
//! - The in-flight marker is held from before the remote call until after the
//!   refetch, and is released on every exit path.
//! - A failed write leaves nodes and edges untouched; no optimistic value is
//!   kept.
//! - Successful update/delete clears the selection.
//! - After a successful write the view shows server state, never a locally
//!   predicted one.

use crate::model::input::{UserInput, UserPatch};
use crate::model::snapshot::{GraphSnapshot, SnapshotError};
use crate::model::user::{Position, UserId};
use crate::remote::{GraphRemote, RemoteError, RemoteResult};
use crate::store::{GraphAction, GraphState, GraphStore};
use crate::view::drop::{plan_hobby_drop, Size};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;

/// Fallback text when a fetch fails without a usable message.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";
/// Prefix for malformed fetch payloads.
pub const INVALID_GRAPH_MESSAGE: &str = "Received invalid graph data";

/// Remote write kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    Link,
    Unlink,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Link => "link",
            Self::Unlink => "unlink",
        }
    }

    /// Shown when the server gives no message of its own.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Create => "Failed to create user.",
            Self::Update => "Failed to update user.",
            Self::Delete => "Failed to delete user.",
            Self::Link => "Failed to link users.",
            Self::Unlink => "Failed to unlink users.",
        }
    }

    /// Writes after which the selected node may be gone or stale.
    pub fn clears_selection(self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }
}

/// Service failure. `Display` is the notification text.
#[derive(Debug)]
pub enum GraphServiceError {
    /// Fetch transport or status failure.
    Fetch(RemoteError),
    /// Fetch returned a malformed payload.
    InvalidSnapshot(SnapshotError),
    /// A write failed; the graph was left as it was.
    Mutation {
        kind: MutationKind,
        source: RemoteError,
    },
}

impl GraphServiceError {
    fn mutation(kind: MutationKind, source: RemoteError) -> Self {
        Self::Mutation { kind, source }
    }
}

impl Display for GraphServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(err) => match err.detail() {
                Some(detail) => write!(f, "{detail}"),
                None => write!(f, "{FETCH_FAILED_MESSAGE}: {err}"),
            },
            Self::InvalidSnapshot(err) => write!(f, "{INVALID_GRAPH_MESSAGE}: {err}"),
            Self::Mutation { kind, source } => {
                write!(f, "{}", source.detail().unwrap_or(kind.fallback_message()))
            }
        }
    }
}

impl Error for GraphServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err),
            Self::InvalidSnapshot(err) => Some(err),
            Self::Mutation { source, .. } => Some(source),
        }
    }
}

impl From<SnapshotError> for GraphServiceError {
    fn from(value: SnapshotError) -> Self {
        Self::InvalidSnapshot(value)
    }
}

/// Success text for a settled write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    message: String,
}

impl Confirmation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Confirmation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Session facade: owns the store and drives the remote graph store.
pub struct GraphService<R: GraphRemote> {
    remote: R,
    store: GraphStore,
}

impl<R: GraphRemote> GraphService<R> {
    /// Creates a service with a fresh, loading store.
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            store: GraphStore::new(),
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Clones the current session state.
    pub fn state(&self) -> GraphState {
        self.store.snapshot()
    }

    /// Fetches the full graph and replaces both collections.
    ///
    /// On failure the previous collections stay and the error slot is set.
    pub async fn fetch_data(&self) -> Result<(), GraphServiceError> {
        self.store.dispatch(GraphAction::FetchStart);
        match self.load_snapshot().await {
            Ok(snapshot) => {
                info!(
                    "event=graph_fetch module=service status=ok users={} friendships={}",
                    snapshot.users.len(),
                    snapshot.friendships.len()
                );
                self.store.dispatch(GraphAction::FetchSuccess(snapshot));
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=graph_fetch module=service status=error kind={}",
                    fetch_error_kind(&err)
                );
                self.store.dispatch(GraphAction::FetchError(err.to_string()));
                Err(err)
            }
        }
    }

    /// Creates a user. The new id is only learned through the refetch.
    pub async fn create_user(&self, input: &UserInput) -> Result<Confirmation, GraphServiceError> {
        let created = self
            .run_mutation(MutationKind::Create, self.remote.create_user(input))
            .await?;
        debug!(
            "event=user_created module=service id={}",
            created.id.as_deref().unwrap_or("-")
        );
        let name = if created.username.is_empty() {
            input.username.as_str()
        } else {
            created.username.as_str()
        };
        Ok(Confirmation::new(format!("User \"{name}\" created!")))
    }

    /// Sends only the provided fields, then clears the selection.
    pub async fn update_user(
        &self,
        user_id: &str,
        patch: &UserPatch,
    ) -> Result<Confirmation, GraphServiceError> {
        let updated = self
            .run_mutation(MutationKind::Update, self.remote.update_user(user_id, patch))
            .await?;
        if updated.username.is_empty() {
            return Ok(Confirmation::new("User updated!"));
        }
        Ok(Confirmation::new(format!(
            "User \"{}\" updated!",
            updated.username
        )))
    }

    /// Deletes a user, then clears the selection.
    pub async fn delete_user(&self, user_id: &str) -> Result<Confirmation, GraphServiceError> {
        self.run_mutation(MutationKind::Delete, self.remote.delete_user(user_id))
            .await?;
        Ok(Confirmation::new("User deleted."))
    }

    /// Creates a friendship between two users.
    pub async fn link_users(
        &self,
        source_id: &str,
        target_id: &str,
    ) -> Result<Confirmation, GraphServiceError> {
        self.run_mutation(
            MutationKind::Link,
            self.remote.link_users(source_id, target_id),
        )
        .await?;
        Ok(Confirmation::new("Users linked."))
    }

    /// Removes the friendship addressed by its endpoint pair.
    pub async fn unlink_users(
        &self,
        source_id: &str,
        target_id: &str,
    ) -> Result<Confirmation, GraphServiceError> {
        self.run_mutation(
            MutationKind::Unlink,
            self.remote.unlink_users(source_id, target_id),
        )
        .await?;
        Ok(Confirmation::new("Users unlinked."))
    }

    /// Edge-delete gesture from the drawing surface.
    ///
    /// The surface only knows the edge id; it is mapped to its endpoint pair
    /// against current state first. Unknown ids are ignored.
    pub async fn unlink_edge(
        &self,
        friendship_id: &str,
    ) -> Result<Option<Confirmation>, GraphServiceError> {
        let endpoints = self
            .store
            .read(|state| state.friendship_endpoints(friendship_id));
        let Some((source_id, target_id)) = endpoints else {
            debug!("event=unlink_edge module=service status=skipped reason=unknown_edge");
            return Ok(None);
        };
        self.unlink_users(&source_id, &target_id).await.map(Some)
    }

    /// Sets or clears the selected node. The id is not checked.
    pub fn select_node(&self, user_id: Option<&str>) {
        self.store
            .dispatch(GraphAction::Select(user_id.map(str::to_string)));
    }

    /// Hobby drop gesture.
    ///
    /// `point` is in flow space; `measured` holds rendered node sizes. A miss
    /// or an empty payload does nothing. A hit submits the merged hobby set
    /// through `update_user`.
    pub async fn drop_hobby(
        &self,
        point: Position,
        payload: Option<&str>,
        measured: &HashMap<UserId, Size>,
    ) -> Result<Option<Confirmation>, GraphServiceError> {
        let plan = self
            .store
            .read(|state| plan_hobby_drop(state.users(), measured, point, payload));
        let Some(plan) = plan else {
            debug!("event=hobby_drop module=service status=skipped");
            return Ok(None);
        };
        let (user_id, patch) = plan.into_patch();
        self.update_user(&user_id, &patch).await.map(Some)
    }

    async fn load_snapshot(&self) -> Result<GraphSnapshot, GraphServiceError> {
        let body = self
            .remote
            .fetch_graph()
            .await
            .map_err(GraphServiceError::Fetch)?;
        Ok(GraphSnapshot::from_value(body)?)
    }

    /// Start, call, refetch, end.
    ///
    /// `call` is lazy, so the remote request only starts once the in-flight
    /// marker is set. A failed refetch after a successful write is recorded
    /// in the store's error slot and does not fail the write.
    async fn run_mutation<T>(
        &self,
        kind: MutationKind,
        call: impl Future<Output = RemoteResult<T>>,
    ) -> Result<T, GraphServiceError> {
        let _in_flight = self.store.begin_mutation();
        debug!("event=mutation module=service op={} status=started", kind.as_str());

        let value = match call.await {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=mutation module=service op={} status=error kind={}",
                    kind.as_str(),
                    err.kind_name()
                );
                return Err(GraphServiceError::mutation(kind, err));
            }
        };

        if self.fetch_data().await.is_err() {
            warn!(
                "event=mutation_refetch module=service op={} status=error",
                kind.as_str()
            );
        }
        if kind.clears_selection() {
            self.store.dispatch(GraphAction::Select(None));
        }

        info!("event=mutation module=service op={} status=ok", kind.as_str());
        Ok(value)
    }
}

fn fetch_error_kind(err: &GraphServiceError) -> &'static str {
    match err {
        GraphServiceError::Fetch(remote) => remote.kind_name(),
        GraphServiceError::InvalidSnapshot(_) => "invalid_snapshot",
        GraphServiceError::Mutation { .. } => "mutation",
    }
}
