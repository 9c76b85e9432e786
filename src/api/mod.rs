//! HTTP API for the medicine store
//!
//! Routes:
//! - `GET /medicines`, `POST /medicines`
//! - `GET|PATCH|DELETE /medicines/:name`
//! - `GET /average`

pub mod error;
pub mod handlers;
pub mod router;

pub use router::medicine_router;
