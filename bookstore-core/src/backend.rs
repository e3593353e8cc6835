//! Storage backend abstraction for the book store.
//!
//! This module defines the contract every storage implementation fulfils, so the rest
//! of the system can work against a file on disk or a remote MongoDB collection without
//! knowing which one it has.
//!
//! # Overview
//!
//! The [`BookBackend`] trait provides a unified async interface for listing, fetching,
//! creating, replacing, deleting and searching books. Implementations are required to
//! be thread-safe (`Send + Sync`) because the HTTP layer drives one backend instance from
//! many concurrent requests.
//!
//! # Traits
//!
//! - [`BookBackend`]: The core trait for storage backends
//! - [`DynBookBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`BookBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use bookstore::{backend::BookBackend, book::Book, file::FileStore};
//!
//! let backend = FileStore::builder("books.json").build().await?;
//!
//! let created = backend.create_book(Book::default()).await?;
//! let fetched = backend.get_book(created.assigned_id().unwrap()).await?;
//! assert_eq!(created, fetched);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::{any::Any, fmt::Debug};

use crate::{
    book::{Book, BookId},
    error::BookStoreResult,
    query::SearchQuery,
};

/// Abstract interface for book storage backends.
///
/// # Thread Safety
///
/// All implementations must support concurrent access from multiple async tasks. The
/// concurrency model (reader/writer lock, delegated to a remote service, ...) is
/// implementation-specific and documented by the implementer.
///
/// # Error Handling
///
/// Operations return [`BookStoreResult<T>`](crate::error::BookStoreResult). Lookups by
/// identifier fail with [`NotFound`](crate::error::BookStoreError::NotFound) when no
/// book matches, and with [`InvalidIdentifier`](crate::error::BookStoreError::InvalidIdentifier)
/// when the backend enforces an identifier format the input does not satisfy.
#[async_trait]
pub trait BookBackend: Send + Sync + Debug {
    /// Returns every book. Order is backend-dependent.
    async fn list_books(&self) -> BookStoreResult<Vec<Book>>;

    /// Returns the book with the given identifier.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if no book has that identifier.
    async fn get_book(&self, id: &BookId) -> BookStoreResult<Book>;

    /// Stores a new book and returns it with its identifier populated.
    ///
    /// If the book has no identifier (or an empty one) a fresh one is generated;
    /// otherwise the caller's identifier is used as-is. Duplicate identifiers are not
    /// detected by every backend.
    async fn create_book(&self, book: Book) -> BookStoreResult<Book>;

    /// Replaces every field of the book at `id`.
    ///
    /// The identifier carried by `book` is ignored; the stored and returned book keeps `id`.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if no book has that identifier.
    async fn replace_book(&self, id: &BookId, book: Book) -> BookStoreResult<Book>;

    /// Removes the book at `id`.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if no book has that identifier, so deleting twice fails the
    /// second time.
    async fn delete_book(&self, id: &BookId) -> BookStoreResult<()>;

    /// Returns every book matching the query. Result order is not guaranteed.
    async fn search_books(&self, query: &SearchQuery) -> BookStoreResult<Vec<Book>>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op; backends holding connections override it.
    async fn shutdown(self) -> BookStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> BookBackend for &B
where
    B: BookBackend,
{
    async fn list_books(&self) -> BookStoreResult<Vec<Book>> {
        BookBackend::list_books(*self).await
    }

    async fn get_book(&self, id: &BookId) -> BookStoreResult<Book> {
        BookBackend::get_book(*self, id).await
    }

    async fn create_book(&self, book: Book) -> BookStoreResult<Book> {
        BookBackend::create_book(*self, book).await
    }

    async fn replace_book(&self, id: &BookId, book: Book) -> BookStoreResult<Book> {
        BookBackend::replace_book(*self, id, book).await
    }

    async fn delete_book(&self, id: &BookId) -> BookStoreResult<()> {
        BookBackend::delete_book(*self, id).await
    }

    async fn search_books(&self, query: &SearchQuery) -> BookStoreResult<Vec<Book>> {
        BookBackend::search_books(*self, query).await
    }
}

/// Object-safe counterpart of [`BookBackend`].
///
/// Every `BookBackend + 'static` implements this automatically, which lets the backend be
/// chosen at startup and stored as `Box<dyn DynBookBackend>`.
#[async_trait]
pub trait DynBookBackend: Send + Sync + Debug {
    async fn list_books(&self) -> BookStoreResult<Vec<Book>>;
    async fn get_book(&self, id: &BookId) -> BookStoreResult<Book>;
    async fn create_book(&self, book: Book) -> BookStoreResult<Book>;
    async fn replace_book(&self, id: &BookId, book: Book) -> BookStoreResult<Book>;
    async fn delete_book(&self, id: &BookId) -> BookStoreResult<()>;
    async fn search_books(&self, query: &SearchQuery) -> BookStoreResult<Vec<Book>>;
    async fn shutdown_boxed(self: Box<Self>) -> BookStoreResult<()>;

    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

#[async_trait]
impl<B: BookBackend + 'static> DynBookBackend for B {
    async fn list_books(&self) -> BookStoreResult<Vec<Book>> {
        BookBackend::list_books(self).await
    }

    async fn get_book(&self, id: &BookId) -> BookStoreResult<Book> {
        BookBackend::get_book(self, id).await
    }

    async fn create_book(&self, book: Book) -> BookStoreResult<Book> {
        BookBackend::create_book(self, book).await
    }

    async fn replace_book(&self, id: &BookId, book: Book) -> BookStoreResult<Book> {
        BookBackend::replace_book(self, id, book).await
    }

    async fn delete_book(&self, id: &BookId) -> BookStoreResult<()> {
        BookBackend::delete_book(self, id).await
    }

    async fn search_books(&self, query: &SearchQuery) -> BookStoreResult<Vec<Book>> {
        BookBackend::search_books(self, query).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> BookStoreResult<()> {
        BookBackend::shutdown(*self).await
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[async_trait]
pub trait BookBackendBuilder {
    type Backend: BookBackend;

    async fn build(self) -> BookStoreResult<Self::Backend>;
}
