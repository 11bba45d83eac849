//! UI layer: HTTP routes and the WebSocket endpoint.

mod error;
mod handler;
mod router;
mod runner;
mod signal;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use runner::{ServerError, run};
