//! Axum HTTP server handlers for token registration and search relay endpoints.

pub mod context;
mod handler_health;
mod handler_mcp;
mod handler_register;
pub mod server;
mod utils_request;

pub use context::AppState;
pub use handler_mcp::RelayResponse;
pub use server::build_router;
