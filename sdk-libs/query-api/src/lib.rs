//! Client for hosted analytics queries.
//!
//! Only result retrieval is supported: queries are authored and scheduled on
//! the hosting service, this crate reads their latest results.

pub mod apis;
pub mod models;
