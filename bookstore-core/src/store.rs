//! Main book store interface for interacting with backends.
//!
//! This module provides the API callers use instead of talking to a backend directly:
//!
//! - [`BookStore`] - Typed store bound to a specific backend implementation
//! - [`DynBookStore`] - Dynamic dispatch store for backends selected at startup
//!
//! Both validate caller input (such as an empty search keyword) before reaching the
//! backend.
//!
//! # Example
//!
//! ```ignore
//! use bookstore::{prelude::*, file::FileStore};
//!
//! let store = BookStore::new(FileStore::builder("books.json").build().await?).into_dyn();
//! let books = store.list().await?;
//! ```

use crate::{
    backend::{BookBackend, DynBookBackend},
    book::{Book, BookId},
    error::BookStoreResult,
    query::SearchQuery,
};

/// A book store bound to a specific backend implementation.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct BookStore<B: BookBackend> {
    backend: B,
}

impl<B: BookBackend> BookStore<B> {
    /// Creates a new book store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Lists every book.
    pub async fn list(&self) -> BookStoreResult<Vec<Book>> {
        BookBackend::list_books(&self.backend).await
    }

    /// Fetches a book by identifier.
    pub async fn get(&self, id: impl Into<BookId>) -> BookStoreResult<Book> {
        BookBackend::get_book(&self.backend, &id.into()).await
    }

    /// Creates a book, generating an identifier if it has none.
    pub async fn create(&self, book: Book) -> BookStoreResult<Book> {
        BookBackend::create_book(&self.backend, book).await
    }

    /// Replaces the book at `id`, keeping `id` as its identifier.
    pub async fn replace(&self, id: impl Into<BookId>, book: Book) -> BookStoreResult<Book> {
        BookBackend::replace_book(&self.backend, &id.into(), book).await
    }

    /// Deletes the book at `id`.
    pub async fn delete(&self, id: impl Into<BookId>) -> BookStoreResult<()> {
        BookBackend::delete_book(&self.backend, &id.into()).await
    }

    /// Searches titles and descriptions for `keyword`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`](crate::error::BookStoreError::InvalidArgument) if the
    /// keyword is empty.
    pub async fn search(&self, keyword: &str) -> BookStoreResult<Vec<Book>> {
        BookBackend::search_books(&self.backend, &SearchQuery::new(keyword)?).await
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> BookStoreResult<()> {
        BookBackend::shutdown(self.backend).await
    }
}

impl<B: BookBackend + 'static> BookStore<B> {
    /// Converts this store into a dynamically dispatched one.
    pub fn into_dyn(self) -> DynBookStore {
        DynBookStore::new(Box::new(self.backend))
    }
}

/// A book store over a backend chosen at runtime.
#[derive(Debug)]
pub struct DynBookStore {
    backend: Box<dyn DynBookBackend>,
}

impl DynBookStore {
    /// Creates a new dynamic book store with the given backend trait object.
    pub fn new(backend: Box<dyn DynBookBackend>) -> Self {
        Self { backend }
    }

    /// Returns the backend as `B` if that is its concrete type.
    pub fn backend_as<B: BookBackend + 'static>(&self) -> Option<&B> {
        self.backend.as_any().downcast_ref::<B>()
    }

    /// Converts back into a typed store if the backend is a `B`.
    pub fn into_static<B: BookBackend + 'static>(self) -> Option<BookStore<B>> {
        self.backend
            .into_any()
            .downcast::<B>()
            .ok()
            .map(|backend| BookStore::new(*backend))
    }

    pub async fn list(&self) -> BookStoreResult<Vec<Book>> {
        self.backend.list_books().await
    }

    pub async fn get(&self, id: impl Into<BookId>) -> BookStoreResult<Book> {
        self.backend.get_book(&id.into()).await
    }

    pub async fn create(&self, book: Book) -> BookStoreResult<Book> {
        self.backend.create_book(book).await
    }

    pub async fn replace(&self, id: impl Into<BookId>, book: Book) -> BookStoreResult<Book> {
        self.backend.replace_book(&id.into(), book).await
    }

    pub async fn delete(&self, id: impl Into<BookId>) -> BookStoreResult<()> {
        self.backend.delete_book(&id.into()).await
    }

    /// Searches titles and descriptions for `keyword`, ignoring case.
    pub async fn search(&self, keyword: &str) -> BookStoreResult<Vec<Book>> {
        self.backend
            .search_books(&SearchQuery::new(keyword)?)
            .await
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> BookStoreResult<()> {
        self.backend.shutdown_boxed().await
    }
}
