//! Shared infrastructure for tagbot
//!
//! Holds the error type and configuration resolution used by the service
//! crate. Kept separate so integration tooling can depend on the config
//! surface without pulling in the service itself.

pub mod config;
pub mod error;

pub use error::{Error, Result};
