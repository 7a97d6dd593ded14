#![warn(clippy::unwrap_used)]

pub mod delivery_rest;
pub mod loyalty_rest;
pub mod rest;
pub mod server;
pub mod swagger;

pub use rest::AppState;
pub use server::{build_router, ApiServer};
pub use swagger::ApiDoc;
