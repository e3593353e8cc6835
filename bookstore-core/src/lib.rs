//! Core types and traits for the bookstore catalogue.
//!
//! This crate is the core of the bookstore project and provides:
//!
//! - **Book record** ([`book`]) - The catalogue entity and its opaque identifier
//! - **Identifier generation** ([`id`]) - A shared generator so every backend hands out the same kind of id
//! - **Backend abstraction** ([`backend`]) - Traits implemented by the file and MongoDB backends
//! - **Keyword search** ([`query`]) - Validated, case-insensitive substring search over books
//! - **Book store** ([`store`]) - Typed and dynamically dispatched façades over a backend
//! - **Error handling** ([`error`]) - The error taxonomy shared by every layer
//!
//! # Example
//!
//! ```ignore
//! use bookstore::{prelude::*, file::FileStore};
//!
//! #[tokio::main]
//! async fn main() -> BookStoreResult<()> {
//!     let store = BookStore::new(FileStore::builder("books.json").build().await?);
//!
//!     let created = store.create(Book {
//!         title: "The Great Gatsby".to_string(),
//!         ..Default::default()
//!     }).await?;
//!
//!     let hits = store.search("gatsby").await?;
//!     assert_eq!(hits[0].id, created.id);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bookstore_core;

pub mod backend;
pub mod book;
pub mod error;
pub mod id;
pub mod query;
pub mod store;
