//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley chat
//! coordinator: users, wire events, errors, and configuration.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod event;
pub mod user;
