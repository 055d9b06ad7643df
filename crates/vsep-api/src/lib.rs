//! Axum HTTP API for the voice separation service.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod output;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, BackendChoice};
pub use error::{ApiError, ApiResult};
pub use output::OutputStore;
pub use routes::create_router;
pub use state::AppState;
