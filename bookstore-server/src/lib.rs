//! HTTP surface for the bookstore catalogue.
//!
//! The server exposes the catalogue as JSON over HTTP:
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | `GET` | `/books` | every book |
//! | `POST` | `/books` | `201` with the created book |
//! | `GET` | `/books/search?q=<keyword>` | books whose title or description contains the keyword |
//! | `GET` | `/books/{id}` | one book |
//! | `PUT` | `/books/{id}` | the replaced book |
//! | `DELETE` | `/books/{id}` | `204` |
//!
//! The backend is chosen once at startup from [`ServerConfig`] and shared by every
//! request through the router state.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

pub use config::{BackendKind, ServerConfig};
pub use error::ApiError;
pub use routes::router;
