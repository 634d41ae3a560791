//! Coordination core for Parley: who is connected, in which room, under
//! which name, and which connections each event fans out to.
//!
//! This crate is transport-agnostic. The API layer feeds it connection
//! ids and client events; it mutates the session directory and pushes
//! [`parley_types::event::ServerEvent`]s into per-connection queues held
//! by the connection registry. It depends only on `parley-types` -- never
//! on axum or any IO crate.

pub mod directory;
pub mod envelope;
pub mod filter;
pub mod protocol;
pub mod registry;
