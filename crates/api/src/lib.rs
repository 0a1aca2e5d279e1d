pub mod cors;
pub mod dto;
pub mod error;
pub mod routes;
pub mod shutdown;

pub use cors::cors_layer;
pub use routes::{build_router, ApiState};
pub use shutdown::shutdown_signal;
