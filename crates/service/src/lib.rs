//! Store layer for parking spots and barriers.
//! - `SpotStore` and `BarrierStore` validate raw inputs, then run one atomic
//!   statement or transaction against the injected connection.
//! - Entities and enums come from the `models` crate.
//! - Failures are reported as [`errors::ServiceError`].

pub mod errors;
pub mod patch;
pub mod validation;
pub mod clock;
pub mod spots;
pub mod barriers;
pub mod runtime;
#[cfg(test)]
pub mod test_support;

pub use barriers::BarrierStore;
pub use spots::SpotStore;
