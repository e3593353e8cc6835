//! JSON file storage backend for bookstore.
//!
//! This crate provides a [`FileStore`] implementing the `BookBackend` trait by keeping the
//! whole catalogue in a single JSON file. It suits development, demos and small
//! single-process deployments.
//!
//! # Features
//!
//! - **Self-initializing** - A missing file is created containing an empty array
//! - **Atomic writes** - Each write goes to a staging file that is renamed into place
//! - **Reader/writer locking** - Concurrent reads, exclusive read-modify-write updates
//! - **Concurrent search** - Keyword search fans out across tokio tasks ([`search`])
//!
//! # Quick Start
//!
//! ```ignore
//! use bookstore::{prelude::*, file::FileStore};
//!
//! #[tokio::main]
//! async fn main() -> BookStoreResult<()> {
//!     let store = BookStore::new(FileStore::builder("books.json").build().await?);
//!
//!     store.create(Book { title: "Pride and Prejudice".to_string(), ..Default::default() }).await?;
//!     println!("{:?}", store.search("prejudice").await?);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bookstore_file;

pub mod search;
pub mod store;

pub use search::{ChunkedSearch, DEFAULT_CHUNK_SIZE};
pub use store::{FileStore, FileStoreBuilder};
