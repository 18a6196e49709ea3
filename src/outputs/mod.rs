//! Output generation for finished searches.
//!
//! # Submodules
//!
//! - [`console`]: numbered result list and "no results" hints for the terminal
//! - [`json`]: optional JSON export of the request and its results

pub mod console;
pub mod json;
