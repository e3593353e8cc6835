//! Keyword search over books.
//!
//! A [`SearchQuery`] is a validated, lower-cased keyword together with the fields it is
//! matched against. Backends either evaluate it client-side with [`SearchQuery::matches`]
//! or translate it into their native query language.
//!
//! ```ignore
//! use bookstore_core::query::SearchQuery;
//!
//! let query = SearchQuery::new("GATSBY")?;
//! assert_eq!(query.keyword(), "gatsby");
//! ```

use crate::{
    book::Book,
    error::{BookStoreError, BookStoreResult},
};

/// A text field of [`Book`] that keyword search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Description,
}

impl SearchField {
    /// Fields searched when a query does not name its own.
    pub const DEFAULT: [SearchField; 2] = [SearchField::Title, SearchField::Description];

    /// The field name in the stored representation.
    pub fn name(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Description => "description",
        }
    }

    pub fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            SearchField::Title => &book.title,
            SearchField::Description => &book.description,
        }
    }
}

/// Case-insensitive substring search over one or more fields, OR'd together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keyword: String,
    fields: Vec<SearchField>,
}

impl SearchQuery {
    /// Creates a query over the title and description.
    ///
    /// # Errors
    ///
    /// Returns [`BookStoreError::InvalidArgument`] if the keyword is empty.
    pub fn new(keyword: &str) -> BookStoreResult<Self> {
        Self::with_fields(keyword, SearchField::DEFAULT)
    }

    /// Creates a query over the given fields.
    ///
    /// # Errors
    ///
    /// Returns [`BookStoreError::InvalidArgument`] if the keyword is empty or no field is given.
    pub fn with_fields(
        keyword: &str,
        fields: impl IntoIterator<Item = SearchField>,
    ) -> BookStoreResult<Self> {
        if keyword.is_empty() {
            return Err(BookStoreError::InvalidArgument(
                "Search keyword is required".to_string(),
            ));
        }

        let fields = fields.into_iter().collect::<Vec<_>>();
        if fields.is_empty() {
            return Err(BookStoreError::InvalidArgument(
                "At least one search field is required".to_string(),
            ));
        }

        Ok(Self {
            keyword: keyword.to_lowercase(),
            fields,
        })
    }

    /// The lower-cased keyword.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    /// Returns true if the keyword occurs in any searched field, ignoring case.
    pub fn matches(&self, book: &Book) -> bool {
        self.fields
            .iter()
            .any(|field| field.value(book).to_lowercase().contains(&self.keyword))
    }
}
