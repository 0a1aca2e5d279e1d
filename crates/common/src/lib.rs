pub mod config;
pub mod errors;
pub mod logging;
mod macros;
pub mod text;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
