//! API endpoint handlers.

pub mod backends;
pub mod circuits;
pub mod health;
pub mod jobs;
