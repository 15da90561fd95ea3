//! qsim HTTP service.
//!
//! Exposes the simulation engine and the optional hardware provider over a
//! small JSON API:
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /api/health` | liveness and version |
//! | `GET /api/backends` | local simulators followed by provider backends |
//! | `POST /api/circuits/run` | simulate locally or submit to hardware |
//! | `POST /api/circuits/code` | generate a Qiskit script for a circuit |
//! | `GET /api/jobs/{id}` | poll a hardware job |
//!
//! Every failure is answered with `{"error": "<message>"}`.

pub mod api;
pub mod dto;
pub mod error;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::create_router;
pub use state::{AppState, ServerConfig};
