//! SeaORM entities for the parking store plus the connection factory.
pub mod db;
pub mod spot;
pub mod barrier;

pub use barrier::BarrierState;
pub use spot::SpotStatus;

#[cfg(test)]
mod tests;
