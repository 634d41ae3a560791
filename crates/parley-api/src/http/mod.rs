//! HTTP layer for Parley.
//!
//! Axum server exposing the `/ws` chat endpoint, a `/health` check, and
//! optional static file serving for the bundled client.

pub mod handlers;
pub mod router;
