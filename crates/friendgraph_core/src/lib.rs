//! Client-side synchronization engine for the friendship graph view.
//! This crate is the single source of truth for what the graph view shows.

pub mod config;
pub mod logging;
pub mod model;
pub mod remote;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, LogConfig, RemoteConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::friendship::{Friendship, FriendshipId};
pub use model::input::{parse_hobby_list, UserInput, UserPatch};
pub use model::snapshot::{GraphSnapshot, SnapshotError};
pub use model::user::{NodeTier, Position, UserData, UserId, UserNode};
pub use remote::http::HttpGraphRemote;
pub use remote::{GraphRemote, RemoteError, RemoteResult, RemoteUser};
pub use service::graph_service::{Confirmation, GraphService, GraphServiceError, MutationKind};
pub use store::{GraphAction, GraphState, GraphStore, MutationGuard};
pub use view::drop::{
    merge_hobby, node_bounds, plan_hobby_drop, resolve_drop_target, HobbyDrop, NodeBounds, Size,
};
pub use view::hobbies::{filter_hobbies, hobby_catalogue};
pub use view::layout::{assign_grid_positions, grid_position};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
