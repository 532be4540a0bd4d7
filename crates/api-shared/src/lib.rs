//! # API Shared
//!
//! Shared request/response definitions for the maternal and child health APIs.
//!
//! Contains:
//! - Request bodies (`pb` module), deserialised identically by the REST surface and the
//!   tool surface so both accept exactly the same field names
//! - The structured error body returned for validation failures
//! - Shared services like `HealthService`
//!
//! Used by `mch-core`, `api-rest` and `api-mcp`.

pub mod health;
pub mod pb;

pub use health::HealthService;
pub use pb::*;
