//! CLI command implementations.
//!
//! Each command returns `Ok(true)` on success, `Ok(false)` when the input
//! was processed but is invalid.

pub mod schema;
pub mod validate;
