//! Use-case services over the store and the remote graph store.
//!
//! # Responsibility
//! - Sequence gesture callbacks (fetch, create, update, delete, link, unlink,
//!   select, hobby drop) into store transitions and remote calls.
//! - Keep rendering collaborators decoupled from transport details.

pub mod graph_service;
