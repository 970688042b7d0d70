//! HTTP request handlers.

pub mod health_handler;
pub mod usuario_handler;

pub use health_handler::health_routes;
pub use usuario_handler::usuario_routes;
