//! Store transitions.

use crate::model::snapshot::GraphSnapshot;
use crate::model::user::UserId;

/// Every way the session state can change.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphAction {
    /// A fetch began. Clears the last error.
    FetchStart,
    /// A fetch returned a validated snapshot; nodes are laid out on apply.
    FetchSuccess(GraphSnapshot),
    /// A fetch failed or returned a malformed payload.
    FetchError(String),
    /// A remote write began.
    MutationStart,
    /// A remote write settled, successfully or not.
    MutationEnd,
    /// Sets or clears the selected node. The id is not validated.
    Select(Option<UserId>),
}

impl GraphAction {
    /// Stable name for log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchStart => "fetch_start",
            Self::FetchSuccess(_) => "fetch_success",
            Self::FetchError(_) => "fetch_error",
            Self::MutationStart => "mutation_start",
            Self::MutationEnd => "mutation_end",
            Self::Select(_) => "select",
        }
    }
}
