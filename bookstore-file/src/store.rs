//! File-backed storage implementation.
//!
//! The whole catalogue lives in one JSON file holding an array of books, pretty-printed
//! with two-space indentation. Every read parses the entire file and every write replaces
//! it.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use mea::rwlock::RwLock;

use bookstore_core::{
    backend::{BookBackend, BookBackendBuilder},
    book::{Book, BookId},
    error::{BookStoreError, BookStoreResult},
    id::{IdGenerator, default_generator},
    query::SearchQuery,
};

use crate::search::ChunkedSearch;

/// Book storage backend persisting the full collection to a JSON file.
///
/// # Thread Safety
///
/// `FileStore` is cloneable; clones share one async reader/writer lock over the file.
/// Reads run concurrently with other reads, writes exclude everything else. Create,
/// replace and delete hold the write guard across their whole read-modify-write
/// sequence, so concurrent writers never lose each other's updates.
///
/// Other processes writing the same file are not coordinated with.
///
/// # Identifiers
///
/// Identifiers are compared as plain strings; a malformed identifier simply matches
/// nothing and yields [`BookStoreError::NotFound`].
///
/// # Example
///
/// ```ignore
/// use bookstore_file::FileStore;
/// use bookstore_core::backend::BookBackend;
///
/// let store = FileStore::builder("books.json").build().await?;
/// let books = store.list_books().await?;
/// ```
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Arc<RwLock<()>>,
    generator: Arc<dyn IdGenerator>,
    search: ChunkedSearch,
}

impl FileStore {
    /// Creates a builder for a store persisted at `path`.
    pub fn builder(path: impl Into<PathBuf>) -> FileStoreBuilder {
        FileStoreBuilder::new(path)
    }

    /// Path of the backing JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full collection.
    pub async fn read_books(&self) -> BookStoreResult<Vec<Book>> {
        let _guard = self.lock.read().await;
        self.load().await
    }

    /// Replaces the full collection with `books`.
    pub async fn write_books(&self, books: &[Book]) -> BookStoreResult<()> {
        let _guard = self.lock.write().await;
        self.persist(books).await
    }

    async fn load(&self) -> BookStoreResult<Vec<Book>> {
        let data = tokio::fs::read(&self.path).await?;

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        // `null` is what an encoder writes for a missing array.
        Ok(serde_json::from_slice::<Option<Vec<Book>>>(&data)?.unwrap_or_default())
    }

    async fn persist(&self, books: &[Book]) -> BookStoreResult<()> {
        let data = serde_json::to_vec_pretty(books)?;
        let staging = staging_path(&self.path);

        tokio::fs::write(&staging, &data).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        tracing::debug!(path = %self.path.display(), books = books.len(), "wrote book file");

        Ok(())
    }
}

/// Sibling file written first and renamed over the target, so readers never see a
/// partially written collection.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn position_of(books: &[Book], id: &BookId) -> Option<usize> {
    books.iter().position(|book| book.id.as_ref() == Some(id))
}

#[async_trait]
impl BookBackend for FileStore {
    async fn list_books(&self) -> BookStoreResult<Vec<Book>> {
        self.read_books().await
    }

    async fn get_book(&self, id: &BookId) -> BookStoreResult<Book> {
        self.read_books()
            .await?
            .into_iter()
            .find(|book| book.id.as_ref() == Some(id))
            .ok_or_else(|| BookStoreError::NotFound(id.to_string()))
    }

    async fn create_book(&self, book: Book) -> BookStoreResult<Book> {
        let id = match book.assigned_id() {
            Some(id) => id.clone(),
            None => self.generator.generate(),
        };
        let book = book.with_id(id.clone());

        let _guard = self.lock.write().await;
        let mut books = self.load().await?;
        books.push(book.clone());
        self.persist(&books).await?;

        tracing::debug!(%id, "created book");

        Ok(book)
    }

    async fn replace_book(&self, id: &BookId, book: Book) -> BookStoreResult<Book> {
        let book = book.with_id(id.clone());

        let _guard = self.lock.write().await;
        let mut books = self.load().await?;
        let index = position_of(&books, id)
            .ok_or_else(|| BookStoreError::NotFound(id.to_string()))?;
        books[index] = book.clone();
        self.persist(&books).await?;

        Ok(book)
    }

    async fn delete_book(&self, id: &BookId) -> BookStoreResult<()> {
        let _guard = self.lock.write().await;
        let mut books = self.load().await?;
        let before = books.len();
        books.retain(|book| book.id.as_ref() != Some(id));

        if books.len() == before {
            return Err(BookStoreError::NotFound(id.to_string()));
        }

        self.persist(&books).await
    }

    async fn search_books(&self, query: &SearchQuery) -> BookStoreResult<Vec<Book>> {
        // The lock is released before searching; workers scan a private snapshot.
        let books = self.read_books().await?;
        self.search.run(books, query).await
    }
}

/// Builder for [`FileStore`].
///
/// Building creates the file (and its parent directories) containing an empty array if
/// it does not exist yet.
///
/// # Example
///
/// ```ignore
/// use bookstore_file::FileStore;
/// use bookstore_core::backend::BookBackendBuilder;
///
/// let store = FileStore::builder("data/books.json")
///     .chunk_size(25)
///     .build()
///     .await?;
/// ```
#[derive(Debug)]
pub struct FileStoreBuilder {
    path: PathBuf,
    generator: Arc<dyn IdGenerator>,
    search: ChunkedSearch,
}

impl FileStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            generator: default_generator(),
            search: ChunkedSearch::default(),
        }
    }

    /// Sets the generator used for books created without an identifier.
    pub fn id_generator(mut self, generator: Arc<dyn IdGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Sets the target number of books scanned per search worker.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.search = ChunkedSearch::new(chunk_size);
        self
    }
}

#[async_trait]
impl BookBackendBuilder for FileStoreBuilder {
    type Backend = FileStore;

    async fn build(self) -> BookStoreResult<Self::Backend> {
        if !tokio::fs::try_exists(&self.path).await? {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }

            tokio::fs::write(&self.path, b"[]")
                .await
                .map_err(|e| BookStoreError::Initialization(e.to_string()))?;

            tracing::info!(path = %self.path.display(), "created empty book file");
        }

        Ok(FileStore {
            path: self.path,
            lock: Arc::new(RwLock::new(())),
            generator: self.generator,
            search: self.search,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tempfile::TempDir;

    use super::*;

    async fn store() -> (TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::builder(dir.path().join("books.json"))
            .build()
            .await
            .unwrap();
        (dir, store)
    }

    fn sample(title: &str) -> Book {
        Book {
            author_id: "author1".to_string(),
            publisher_id: "publisher1".to_string(),
            title: title.to_string(),
            publication_date: "2023-01-01".to_string(),
            isbn: "1234567890".to_string(),
            pages: 100,
            genre: "Test".to_string(),
            description: format!("Description of {title}"),
            price: 9.99,
            quantity: 10,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn build_initializes_missing_file_with_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("books.json");

        let store = FileStore::builder(&path).build().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(store.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn build_keeps_existing_content() {
        let (dir, store) = store().await;
        store.create_book(sample("Kept")).await.unwrap();

        let reopened = FileStore::builder(dir.path().join("books.json"))
            .build()
            .await
            .unwrap();

        assert_eq!(reopened.list_books().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn written_collection_reads_back_exactly() {
        let (_dir, store) = store().await;
        let books = vec![
            sample("Test Book 1").with_id("a".into()),
            sample("Test Book 2").with_id("b".into()),
        ];

        store.write_books(&books).await.unwrap();

        assert_eq!(store.read_books().await.unwrap(), books);
    }

    #[tokio::test]
    async fn file_is_pretty_printed_json_array() {
        let (_dir, store) = store().await;
        store
            .write_books(&[sample("Pretty").with_id("x".into())])
            .await
            .unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();

        assert!(raw.starts_with("[\n  {\n    \"bookId\": \"x\""));
        assert!(!staging_path(store.path()).exists());
    }

    #[tokio::test]
    async fn null_or_blank_file_reads_as_empty() {
        let (_dir, store) = store().await;

        std::fs::write(store.path(), "null").unwrap();
        assert!(store.read_books().await.unwrap().is_empty());

        std::fs::write(store.path(), "  \n").unwrap();
        assert!(store.read_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let (_dir, store) = store().await;
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(
            store.list_books().await,
            Err(BookStoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn create_then_get_returns_input_with_id() {
        let (_dir, store) = store().await;
        let input = sample("New Test Book");

        let created = store.create_book(input.clone()).await.unwrap();
        let id = created.assigned_id().cloned().unwrap();
        let fetched = store.get_book(&id).await.unwrap();

        assert_eq!(fetched, input.with_id(id.clone()));
        assert!(id.to_object_id().is_ok());
    }

    #[tokio::test]
    async fn create_keeps_caller_supplied_id() {
        let (_dir, store) = store().await;

        let created = store
            .create_book(sample("Preassigned").with_id("my-own-id".into()))
            .await
            .unwrap();

        assert_eq!(created.id, Some(BookId::new("my-own-id")));
        assert_eq!(store.get_book(&"my-own-id".into()).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_treats_empty_id_as_unset() {
        let (_dir, store) = store().await;

        let created = store
            .create_book(sample("Empty id").with_id("".into()))
            .await
            .unwrap();

        assert!(created.assigned_id().is_some());
    }

    #[tokio::test]
    async fn get_unknown_or_malformed_id_is_not_found() {
        let (_dir, store) = store().await;
        store.create_book(sample("Only")).await.unwrap();

        for id in ["65f1c2a9e4b0a1b2c3d4e5f6", "definitely not an id"] {
            assert!(matches!(
                store.get_book(&id.into()).await,
                Err(BookStoreError::NotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn replace_preserves_identifier() {
        let (_dir, store) = store().await;
        let created = store.create_book(sample("Original")).await.unwrap();
        let id = created.assigned_id().cloned().unwrap();

        let replacement = sample("Replaced").with_id("some-other-id".into());
        let replaced = store.replace_book(&id, replacement).await.unwrap();

        assert_eq!(replaced.id, Some(id.clone()));
        assert_eq!(replaced.title, "Replaced");
        assert_eq!(store.get_book(&id).await.unwrap(), replaced);
        assert_eq!(store.list_books().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replace_unknown_id_is_not_found() {
        let (_dir, store) = store().await;

        assert!(matches!(
            store.replace_book(&"missing".into(), sample("x")).await,
            Err(BookStoreError::NotFound(_))
        ));
        assert!(store.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_succeeds_once_then_not_found() {
        let (_dir, store) = store().await;
        let keep = store.create_book(sample("Keep")).await.unwrap();
        let created = store.create_book(sample("Doomed")).await.unwrap();
        let id = created.assigned_id().cloned().unwrap();

        store.delete_book(&id).await.unwrap();
        assert!(matches!(
            store.delete_book(&id).await,
            Err(BookStoreError::NotFound(_))
        ));
        assert_eq!(store.list_books().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_collection_unchanged() {
        let (_dir, store) = store().await;
        store.create_book(sample("A")).await.unwrap();
        let before = std::fs::read(store.path()).unwrap();

        assert!(store.delete_book(&"nope".into()).await.is_err());

        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let (_dir, store) = store().await;
        let gatsby = store.create_book(sample("The Great Gatsby")).await.unwrap();
        store.create_book(sample("Moby-Dick")).await.unwrap();

        for keyword in ["gatsby", "GATSBY", "reat gats"] {
            let found = store
                .search_books(&SearchQuery::new(keyword).unwrap())
                .await
                .unwrap();
            assert_eq!(found, vec![gatsby.clone()], "{keyword}");
        }
    }

    #[tokio::test]
    async fn search_matches_description_as_well_as_title() {
        let (_dir, store) = store().await;
        let mut whale = sample("Moby-Dick");
        whale.description = "Captain Ahab hunts the white whale".to_string();
        let whale = store.create_book(whale).await.unwrap();
        let hobbit = store.create_book(sample("The Hobbit")).await.unwrap();
        store.create_book(sample("1984")).await.unwrap();

        let found = store
            .search_books(&SearchQuery::new("WHALE").unwrap())
            .await
            .unwrap();
        assert_eq!(found, vec![whale]);

        let found = store
            .search_books(&SearchQuery::new("hobbit").unwrap())
            .await
            .unwrap();
        assert_eq!(found, vec![hobbit]);
    }

    #[tokio::test]
    async fn concurrent_creates_are_not_lost() {
        let (_dir, store) = store().await;

        let tasks = (0..32)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.create_book(sample(&format!("Book {n}"))).await })
            })
            .collect::<Vec<_>>();

        let mut ids = HashSet::new();
        for task in tasks {
            let created = task.await.unwrap().unwrap();
            ids.insert(created.id.unwrap());
        }

        let stored = store.list_books().await.unwrap();
        assert_eq!(stored.len(), 32);
        assert_eq!(
            stored.into_iter().filter_map(|book| book.id).collect::<HashSet<_>>(),
            ids
        );
    }
}
