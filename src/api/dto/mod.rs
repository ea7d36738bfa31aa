//! Data Transfer Objects for REST request/response serialization.
//!
//! Timestamps are serialized as RFC 3339 strings in UTC.

pub mod earthquake_dto;
pub mod sync_dto;

pub use earthquake_dto::*;
pub use sync_dto::*;
