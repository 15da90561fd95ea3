//! CLI command implementations.

pub mod backends;
pub mod code;
pub mod common;
pub mod qasm;
pub mod run;
pub mod status;
pub mod version;
