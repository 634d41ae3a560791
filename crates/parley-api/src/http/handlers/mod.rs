//! HTTP request handlers.

pub mod ws;
