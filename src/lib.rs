pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod session;

pub use config::Config;
pub use error::AppError;
