//! # namesieve
//!
//! Command line front end for the namesieve engine:
//! - **commands**: the boundary operations over a file cache
//! - **config**: environment configuration
//! - **error**: command error type
//! - **tracing**: logging setup
//!
//! ## Usage
//!
//! ```text
//! namesieve add request.json
//! namesieve find query.json --output response.json
//! namesieve remove db1
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod tracing;

pub use config::Config;
pub use error::{Error, Result};
