//! Graph domain model as seen by the view engine.
//!
//! # Responsibility
//! - Define the user (node) and friendship (edge) shapes exchanged with the
//!   remote graph store.
//! - Define write inputs and fetch payload validation.
//!
//! # Invariants
//! - Every node is identified by a stable opaque `UserId`.
//! - Node positions are presentation-only and never part of node identity.

pub mod friendship;
pub mod input;
pub mod snapshot;
pub mod user;
