//! HTTP client for the Realtor assistant backend
//!
//! Provides async methods for the `/chat`, `/health`, `/topics`, `/feedback`
//! and `/stats` endpoints.

pub mod client;
pub mod types;

pub use client::*;
