//! Query module.
//!
//! Query builders and models for filtering index listings.
//! Note: Query execution is handled by the search client.
//! This module only builds the query pieces.

pub mod builders;
pub mod models;

pub use builders::*;
pub use models::*;
