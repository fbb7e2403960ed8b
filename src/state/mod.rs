pub mod favorites;
pub mod session;
