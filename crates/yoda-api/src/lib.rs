//! # YODA API
//!
//! HTTP interface to the metadata quality assessment engine.
//! `POST /mqavalues` takes an RDF/XML document as the raw request body and
//! answers with the per-metric reports and the score summary.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use extract::MetadataDocument;
pub use handlers::AppState;
pub use models::*;
pub use routes::create_router;
pub use server::{shutdown_signal, MqaServer, ServerConfig};
