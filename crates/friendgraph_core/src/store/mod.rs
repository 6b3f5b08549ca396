//! Graph state store.
//!
//! # Responsibility
//! - Own the single authoritative `GraphState` for one session.
//! - Apply `GraphAction` transitions and broadcast each new snapshot.
//!
//! # Invariants
//! - State changes only through `GraphStore::dispatch`.
//! - Each dispatch is synchronous, so observers never see half a transition.
//! - A `MutationGuard` always dispatches `MutationEnd` when dropped.

mod action;
mod state;

pub use action::GraphAction;
pub use state::GraphState;

use log::debug;
use tokio::sync::watch;

/// Single-writer holder of the session state.
pub struct GraphStore {
    tx: watch::Sender<GraphState>,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(GraphState::default());
        Self { tx }
    }

    /// Applies one transition and notifies subscribers.
    pub fn dispatch(&self, action: GraphAction) {
        debug!("event=store_dispatch module=store action={}", action.name());
        self.tx.send_modify(|state| state.apply(action));
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> GraphState {
        self.tx.borrow().clone()
    }

    /// Reads the current state without cloning.
    ///
    /// `f` must not dispatch; the state is borrowed while it runs.
    pub fn read<T>(&self, f: impl FnOnce(&GraphState) -> T) -> T {
        f(&self.tx.borrow())
    }

    /// Receiver that observes every future snapshot.
    pub fn subscribe(&self) -> watch::Receiver<GraphState> {
        self.tx.subscribe()
    }

    /// Marks one write as in flight until the guard is dropped.
    pub fn begin_mutation(&self) -> MutationGuard<'_> {
        self.dispatch(GraphAction::MutationStart);
        MutationGuard { store: self }
    }
}

/// Scoped in-flight write marker.
#[must_use = "dropping the guard ends the mutation immediately"]
pub struct MutationGuard<'a> {
    store: &'a GraphStore,
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        self.store.dispatch(GraphAction::MutationEnd);
    }
}
