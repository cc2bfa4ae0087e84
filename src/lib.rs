pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod stream;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
