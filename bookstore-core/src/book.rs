//! The book record and its identifier.
//!
//! [`Book`] is the only entity in the catalogue. Its JSON shape is the external
//! representation served over HTTP and persisted by the file backend; the MongoDB
//! backend stores the same fields but keeps the identifier in `_id`.

use std::fmt;

use bson::{Bson, de::deserialize_from_bson, oid::ObjectId, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};

use crate::error::{BookStoreError, BookStoreResult};

/// Opaque, stable identifier of a [`Book`].
///
/// Identifiers are compared by their string form. Backends that need a native
/// encoding (such as MongoDB's ObjectId) parse it with [`BookId::to_object_id`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses this identifier as a 24 hex digit ObjectId.
    ///
    /// # Errors
    ///
    /// Returns [`BookStoreError::InvalidIdentifier`] if the string is not a valid ObjectId.
    pub fn to_object_id(&self) -> BookStoreResult<ObjectId> {
        ObjectId::parse_str(&self.0)
            .map_err(|_| BookStoreError::InvalidIdentifier(self.0.clone()))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<ObjectId> for BookId {
    fn from(id: ObjectId) -> Self {
        Self(id.to_hex())
    }
}

/// A single catalogue entry.
///
/// Only the identifier carries an invariant: it is unique within a store and never
/// changes once assigned. Every other field is free-form and unvalidated. Missing
/// fields decode to their defaults.
///
/// # Example
///
/// ```ignore
/// use bookstore_core::book::Book;
///
/// let book: Book = serde_json::from_str(r#"{ "title": "1984", "pages": 328 }"#)?;
/// assert!(book.id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    #[serde(rename = "bookId", alias = "identifier", skip_serializing_if = "is_unset")]
    pub id: Option<BookId>,
    pub author_id: String,
    pub publisher_id: String,
    pub title: String,
    pub publication_date: String,
    pub isbn: String,
    pub pages: i64,
    pub genre: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

fn is_unset(id: &Option<BookId>) -> bool {
    id.as_ref().is_none_or(BookId::is_empty)
}

impl Book {
    /// Returns the identifier if one has been assigned.
    ///
    /// An empty identifier counts as unassigned.
    pub fn assigned_id(&self) -> Option<&BookId> {
        self.id.as_ref().filter(|id| !id.is_empty())
    }

    /// Returns this book with its identifier replaced.
    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }

    /// Converts this book to a BSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_bson(&self) -> BookStoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    /// Creates a book from a BSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    pub fn from_bson(bson: Bson) -> BookStoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }
}
