//! Convenient re-exports of commonly used types from bookstore.
//!
//! ```ignore
//! use bookstore::prelude::*;
//! ```

pub use bookstore_core::{
    backend::{BookBackend, BookBackendBuilder, DynBookBackend},
    book::{Book, BookId},
    error::{BookStoreError, BookStoreResult},
    id::{IdGenerator, ObjectIdGenerator},
    query::{SearchField, SearchQuery},
    store::{BookStore, DynBookStore},
};
