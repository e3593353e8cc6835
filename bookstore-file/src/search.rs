//! Concurrent keyword search over an in-memory snapshot of books.
//!
//! The snapshot is split into contiguous chunks and each chunk is scanned by its own
//! tokio task. Matches flow into a shared unbounded channel. A coordinator task joins
//! every worker before releasing the last sender, so the caller's drain loop ends exactly
//! when all workers are done.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc;

use bookstore_core::{
    book::Book,
    error::{BookStoreError, BookStoreResult},
    query::SearchQuery,
};

/// Target number of books scanned by one worker.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Fan-out/fan-in substring search.
///
/// Result order follows worker completion and is not stable between runs.
#[derive(Debug, Clone, Copy)]
pub struct ChunkedSearch {
    chunk_size: usize,
}

impl Default for ChunkedSearch {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ChunkedSearch {
    /// Creates a search with the given target chunk size. Zero is treated as one.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Chunk size used for a collection of `len` books.
    ///
    /// Collections smaller than the target size get one book per worker.
    pub fn effective_chunk_size(&self, len: usize) -> usize {
        if len < self.chunk_size {
            1
        } else {
            self.chunk_size
        }
    }

    /// Number of workers spawned for a collection of `len` books.
    pub fn worker_count(&self, len: usize) -> usize {
        len.div_ceil(self.effective_chunk_size(len))
    }

    /// Returns every book in `books` matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`BookStoreError::Internal`] if a worker panicked. Workers are never
    /// cancelled; a failure is only reported once all of them have finished.
    pub async fn run(&self, books: Vec<Book>, query: &SearchQuery) -> BookStoreResult<Vec<Book>> {
        let books: Arc<[Book]> = books.into();
        let chunk_size = self.effective_chunk_size(books.len());
        let (tx, mut rx) = mpsc::unbounded_channel::<Book>();

        let workers = (0..self.worker_count(books.len()))
            .map(|chunk| {
                let books = Arc::clone(&books);
                let query = query.clone();
                let tx = tx.clone();
                let start = chunk * chunk_size;
                let end = (start + chunk_size).min(books.len());

                tokio::spawn(async move {
                    for book in &books[start..end] {
                        if query.matches(book) && tx.send(book.clone()).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            workers = workers.len(),
            chunk_size,
            keyword = query.keyword(),
            "searching books"
        );

        let coordinator = tokio::spawn(async move {
            let failed = join_all(workers)
                .await
                .into_iter()
                .filter(|result| result.is_err())
                .count();

            // Closing the channel only after every worker has joined.
            drop(tx);
            failed
        });

        let mut matches = Vec::new();
        while let Some(book) = rx.recv().await {
            matches.push(book);
        }

        let failed = coordinator
            .await
            .map_err(|e| BookStoreError::Internal(e.to_string()))?;
        if failed > 0 {
            tracing::error!(failed, "search workers panicked");
            return Err(BookStoreError::Internal(format!(
                "{failed} search workers failed"
            )));
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn book(n: usize, title: &str, description: &str) -> Book {
        Book {
            id: Some(n.to_string().into()),
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn ids(books: &[Book]) -> HashSet<String> {
        books
            .iter()
            .filter_map(|book| book.id.as_ref().map(ToString::to_string))
            .collect()
    }

    #[test]
    fn chunk_size_collapses_for_small_collections() {
        let search = ChunkedSearch::default();

        assert_eq!(search.effective_chunk_size(3), 1);
        assert_eq!(search.worker_count(3), 3);
        assert_eq!(search.effective_chunk_size(10), 10);
        assert_eq!(search.worker_count(25), 3);
        assert_eq!(search.worker_count(0), 0);
        assert_eq!(ChunkedSearch::new(0).chunk_size(), 1);
    }

    #[tokio::test]
    async fn empty_collection_yields_nothing() {
        let query = SearchQuery::new("anything").unwrap();

        let found = ChunkedSearch::default().run(vec![], &query).await.unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn no_match_is_empty_not_error() {
        let books = vec![book(1, "Moby-Dick", "A whale"), book(2, "1984", "Big Brother")];
        let query = SearchQuery::new("gatsby").unwrap();

        let found = ChunkedSearch::default().run(books, &query).await.unwrap();

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn matches_equal_sequential_filter_across_chunks() {
        let books = (0..137)
            .map(|n| match n % 3 {
                0 => book(n, &format!("Gatsby volume {n}"), "plain"),
                1 => book(n, "Plain title", &format!("mentions GATSBY in passing {n}")),
                _ => book(n, "Unrelated", "nothing to see"),
            })
            .collect::<Vec<_>>();
        let query = SearchQuery::new("gatsby").unwrap();

        let expected = books
            .iter()
            .filter(|book| query.matches(book))
            .cloned()
            .collect::<Vec<_>>();

        for chunk_size in [1, 7, 10, 200] {
            let found = ChunkedSearch::new(chunk_size)
                .run(books.clone(), &query)
                .await
                .unwrap();

            assert_eq!(found.len(), expected.len(), "chunk size {chunk_size}");
            assert_eq!(ids(&found), ids(&expected), "chunk size {chunk_size}");
        }
    }
}
