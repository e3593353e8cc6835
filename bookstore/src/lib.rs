//! Main bookstore crate providing a single entry point to the book catalogue.
//!
//! It re-exports the core types from `bookstore-core` and gives convenient access to the
//! storage backends.
//!
//! # Features
//!
//! - **Typed book records** - One serde model shared by every backend and the HTTP layer
//! - **Interchangeable backends** - A JSON file or MongoDB, selected once at startup
//! - **Keyword search** - Case-insensitive substring search over titles and descriptions
//!
//! # Quick Start
//!
//! ```ignore
//! use bookstore::{prelude::*, file::FileStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = BookStore::new(FileStore::builder("books.json").build().await.unwrap());
//!
//!     let created = store
//!         .create(Book {
//!             title: "Moby-Dick".to_string(),
//!             description: "Captain Ahab and the white whale".to_string(),
//!             ..Default::default()
//!         })
//!         .await
//!         .unwrap();
//!
//!     let hits = store.search("WHALE").await.unwrap();
//!     assert_eq!(hits, vec![created]);
//!
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! A server that picks its backend from configuration converts the typed store with
//! `into_dyn` and works with [`DynBookStore`](store::DynBookStore) from then on.
//!
//! ```ignore
//! use bookstore::{prelude::*, mongodb::MongoDbStore};
//!
//! let store: DynBookStore = BookStore::new(
//!     MongoDbStore::builder("mongodb://localhost:27017", "bookstore").build().await?,
//! )
//! .into_dyn();
//! ```
//!
//! # Backends
//!
//! - [`file`] - Whole-collection JSON file with concurrent chunked search
//! - [`mongodb`] - MongoDB collection (requires `mongodb` feature)

pub mod prelude;

pub use bookstore_core::{backend, book, error, id, query, store};

// Re-export BSON types for convenience
pub use bson;

/// File storage backend implementations.
pub mod file {
    pub use bookstore_file::{ChunkedSearch, DEFAULT_CHUNK_SIZE, FileStore, FileStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use bookstore_mongodb::{
        DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_TIMEOUT, MongoDbStore, MongoDbStoreBuilder,
    };
}
