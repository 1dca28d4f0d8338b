//! Command implementations

pub mod extract;
pub mod health;
pub mod types;
