//! MongoDB backend implementation for bookstore.
//!
//! This crate provides a MongoDB-based implementation of the `BookBackend` trait, storing
//! one document per book and delegating keyword search to the server.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bookstore = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Features
//!
//! - **Persistent storage** - Books live in a MongoDB collection, keyed by ObjectId
//! - **Bounded calls** - Every operation runs under a deadline (ten seconds by default)
//! - **Server-side search** - Keyword search becomes a case-insensitive `$regex` query
//! - **Strict identifiers** - Malformed ids are rejected before touching the network
//!
//! # Example
//!
//! ```ignore
//! use bookstore::{backend::BookBackendBuilder, mongodb::MongoDbStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "bookstore")
//!         .collection("books")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bookstore_mongodb;

pub(crate) mod query;
pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder, DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_TIMEOUT};
