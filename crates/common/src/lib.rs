//! Shared plumbing for the parking workspace: logging setup, small response
//! types and startup environment checks.

pub mod types;
pub mod utils;
pub mod env;
