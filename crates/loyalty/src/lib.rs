//! Loyalty club tier engine.

pub mod engine;

pub use engine::{classify, LoyaltyEngine};
