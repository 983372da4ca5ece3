//! Explain API module.
//!
//! Reads the lifecycle status the explain API reports for each index and
//! normalizes it into the dashboard's managed index metadata.

pub mod error;
pub mod metadata;
pub mod models;
pub mod response;

pub use error::*;
pub use metadata::*;
pub use models::*;
pub use response::*;
