//! Ingestion: coordinate decoding and detail normalization.
//!
//! Both stages are pure functions with no I/O or shared state, so the
//! sync orchestrator may run them concurrently across events.

pub mod coordinate;
pub mod normalize;

pub use coordinate::{Coordinate, parse_coordinate};
pub use normalize::{normalize_detail, normalize_report};
