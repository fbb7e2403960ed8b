pub mod api;
pub mod cache;
pub mod error;
pub mod transport;
pub mod types;
