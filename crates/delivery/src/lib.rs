//! Delivery fee calculation from route distance.

pub mod pricing;

pub use pricing::{quote, DeliveryPricer};
