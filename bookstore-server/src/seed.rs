//! Bundled sample catalogue.

use bookstore::prelude::*;

const SAMPLE_BOOKS: &str = include_str!("../data/sample_books.json");

/// The ten bundled sample books, without identifiers.
pub fn sample_books() -> BookStoreResult<Vec<Book>> {
    Ok(serde_json::from_str(SAMPLE_BOOKS)?)
}

/// Creates every sample book through `store`, returning them with their new identifiers.
pub async fn seed(store: &DynBookStore) -> BookStoreResult<Vec<Book>> {
    let mut created = Vec::new();

    for book in sample_books()? {
        created.push(store.create(book).await?);
    }

    tracing::info!(count = created.len(), "seeded sample books");

    Ok(created)
}
