//! API Module
//!
//! HTTP handlers and routing for the storage inspection API and the static
//! frontend server.
//!
//! # Endpoints
//! - `GET /storage` - List keys
//! - `GET|PUT|DELETE /storage/:key` - Raw string access
//! - `GET|PUT /storage/:key/json` - JSON access
//! - `POST /maintenance/migrate` - Run the migration pass
//! - `POST /maintenance/cleanup` - Run the cleanup pass
//! - `GET /stats` - Accessor statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
