//! Presentation-side graph computations.
//!
//! # Responsibility
//! - Assign deterministic grid positions to fetched nodes.
//! - Resolve pointer drops to nodes and merge dropped hobbies.
//! - Derive the hobby palette from current nodes.
//!
//! # Invariants
//! - Everything here is pure: no store access, no remote calls.

pub mod drop;
pub mod hobbies;
pub mod layout;
