pub mod auth;
pub mod format;
pub mod resource;
pub mod storage;
