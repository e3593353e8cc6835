use std::{future::Future, iter::once, sync::Arc, time::Duration};

use async_trait::async_trait;
use bson::{Bson, Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Client, Collection as MongoCollection, options::ClientOptions};

use bookstore_core::{
    backend::{BookBackend, BookBackendBuilder},
    book::{Book, BookId},
    error::{BookStoreError, BookStoreResult},
    id::{IdGenerator, default_generator},
    query::SearchQuery,
};

use crate::query::MongoSearchTranslator;

/// Deadline applied to every MongoDB call unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DATABASE: &str = "bookstore";
pub const DEFAULT_COLLECTION: &str = "books";

/// Book storage backend keeping one MongoDB document per book.
///
/// The book identifier is stored as the document's `_id` ObjectId, so identifiers must
/// be 24 hex digits. Malformed identifiers fail with
/// [`BookStoreError::InvalidIdentifier`] before any request is sent. Each call is bounded
/// by the store's timeout and fails with [`BookStoreError::Timeout`] when it elapses.
#[derive(Debug, Clone)]
pub struct MongoDbStore {
    client: Client,
    collection: MongoCollection<Document>,
    timeout: Duration,
    generator: Arc<dyn IdGenerator>,
}

impl MongoDbStore {
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
            client,
            timeout: DEFAULT_TIMEOUT,
            generator: default_generator(),
        }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_id_generator(mut self, generator: Arc<dyn IdGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T, F>(&self, operation: &'static str, future: F) -> BookStoreResult<T>
    where
        F: Future<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, future).await {
            Ok(result) => result.map_err(|e| {
                tracing::error!(operation, error = %e, "mongodb operation failed");
                BookStoreError::Storage(e.to_string())
            }),
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.timeout, "mongodb operation timed out");
                Err(BookStoreError::Timeout(operation.to_string(), self.timeout))
            }
        }
    }

    fn prepare_document(&self, id: ObjectId, book: &Book) -> BookStoreResult<Document> {
        let fields = Book { id: None, ..book.clone() }
            .to_bson()?
            .as_document()
            .cloned()
            .ok_or_else(|| BookStoreError::Serialization("Expected document".into()))?;

        Ok(Document::from_iter(
            once(("_id".to_string(), Bson::ObjectId(id))).chain(fields),
        ))
    }

    fn restore_document(&self, document: Document) -> BookStoreResult<Book> {
        let id = match document.get("_id") {
            Some(Bson::ObjectId(oid)) => Some(BookId::from(*oid)),
            Some(Bson::String(id)) => Some(BookId::new(id.clone())),
            _ => None,
        };

        let book = Book::from_bson(Bson::Document(Document::from_iter(
            document
                .into_iter()
                .filter(|(k, _)| k != "_id"),
        )))?;

        Ok(Book { id, ..book })
    }

    fn restore_documents(&self, documents: Vec<Document>) -> BookStoreResult<Vec<Book>> {
        documents
            .into_iter()
            .map(|document| self.restore_document(document))
            .collect()
    }
}

#[async_trait]
impl BookBackend for MongoDbStore {
    async fn list_books(&self) -> BookStoreResult<Vec<Book>> {
        let documents = self
            .bounded("list_books", async {
                self.collection
                    .find(doc! {})
                    .await?
                    .try_collect::<Vec<Document>>()
                    .await
            })
            .await?;

        self.restore_documents(documents)
    }

    async fn get_book(&self, id: &BookId) -> BookStoreResult<Book> {
        let oid = id.to_object_id()?;

        self.bounded("get_book", async {
            self.collection.find_one(doc! { "_id": oid }).await
        })
        .await?
        .map(|document| self.restore_document(document))
        .ok_or_else(|| BookStoreError::NotFound(id.to_string()))?
    }

    async fn create_book(&self, book: Book) -> BookStoreResult<Book> {
        let id = match book.assigned_id() {
            Some(id) => id.clone(),
            None => self.generator.generate(),
        };
        let document = self.prepare_document(id.to_object_id()?, &book)?;

        self.bounded("create_book", async {
            self.collection.insert_one(document).await
        })
        .await?;

        tracing::debug!(%id, "created book");

        Ok(book.with_id(id))
    }

    async fn replace_book(&self, id: &BookId, book: Book) -> BookStoreResult<Book> {
        let oid = id.to_object_id()?;
        let document = self.prepare_document(oid, &book)?;

        let result = self
            .bounded("replace_book", async {
                self.collection
                    .replace_one(doc! { "_id": oid }, document)
                    .await
            })
            .await?;

        if result.matched_count == 0 {
            return Err(BookStoreError::NotFound(id.to_string()));
        }

        Ok(book.with_id(id.clone()))
    }

    async fn delete_book(&self, id: &BookId) -> BookStoreResult<()> {
        let oid = id.to_object_id()?;

        let result = self
            .bounded("delete_book", async {
                self.collection.delete_one(doc! { "_id": oid }).await
            })
            .await?;

        if result.deleted_count == 0 {
            return Err(BookStoreError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn search_books(&self, query: &SearchQuery) -> BookStoreResult<Vec<Book>> {
        let filter = MongoSearchTranslator::translate(query);

        let documents = self
            .bounded("search_books", async {
                self.collection
                    .find(filter)
                    .await?
                    .try_collect::<Vec<Document>>()
                    .await
            })
            .await?;

        self.restore_documents(documents)
    }

    async fn shutdown(self) -> BookStoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

/// Builder for [`MongoDbStore`].
///
/// By default the built store targets the `books` collection, uses a ten second
/// deadline per operation, and pings the server once before returning so that a bad
/// connection string fails at startup rather than on the first request.
pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
    collection: String,
    timeout: Duration,
    generator: Arc<dyn IdGenerator>,
    verify_connection: bool,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            generator: default_generator(),
            verify_connection: true,
        }
    }

    pub fn collection(mut self, collection: &str) -> Self {
        self.collection = collection.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn id_generator(mut self, generator: Arc<dyn IdGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Whether `build` pings the server before returning.
    pub fn verify_connection(mut self, verify: bool) -> Self {
        self.verify_connection = verify;
        self
    }
}

#[async_trait]
impl BookBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> BookStoreResult<Self::Backend> {
        let options = tokio::time::timeout(self.timeout, async { ClientOptions::parse(&self.dsn).await })
            .await
            .map_err(|_| BookStoreError::Initialization("Timed out parsing connection string".into()))?
            .map_err(|e| BookStoreError::Initialization(e.to_string()))?;
        let client = Client::with_options(options)
            .map_err(|e| BookStoreError::Initialization(e.to_string()))?;

        if self.verify_connection {
            tokio::time::timeout(
                self.timeout,
                async { client.database(&self.database).run_command(doc! { "ping": 1 }).await },
            )
            .await
            .map_err(|_| BookStoreError::Initialization("Timed out connecting to MongoDB".into()))?
            .map_err(|e| BookStoreError::Initialization(e.to_string()))?;

            tracing::info!(database = %self.database, collection = %self.collection, "connected to MongoDB");
        }

        Ok(MongoDbStore::new(client, &self.database, &self.collection)
            .with_timeout(self.timeout)
            .with_id_generator(self.generator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 1 has no listener; the driver keeps retrying server selection until our own
    // deadline fires.
    async fn offline_store() -> MongoDbStore {
        let options = ClientOptions::parse("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=30000")
            .await
            .unwrap();
        MongoDbStore::new(Client::with_options(options).unwrap(), DEFAULT_DATABASE, DEFAULT_COLLECTION)
            .with_timeout(Duration::from_millis(100))
    }

    fn book() -> Book {
        Book {
            title: "Brave New World".to_string(),
            description: "A futuristic World State".to_string(),
            pages: 288,
            price: 13.99,
            quantity: 4,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn malformed_ids_fail_before_any_request() {
        let store = offline_store().await;
        let bad = BookId::new("bb329a31-6b1e-4daa-87ee-71631aa05866");

        assert!(matches!(store.get_book(&bad).await, Err(BookStoreError::InvalidIdentifier(_))));
        assert!(matches!(store.replace_book(&bad, book()).await, Err(BookStoreError::InvalidIdentifier(_))));
        assert!(matches!(store.delete_book(&bad).await, Err(BookStoreError::InvalidIdentifier(_))));
        assert!(matches!(
            store.create_book(book().with_id(bad)).await,
            Err(BookStoreError::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_times_out() {
        let store = offline_store().await;

        let result = store.get_book(&BookId::from(ObjectId::new())).await;

        assert!(matches!(result, Err(BookStoreError::Timeout(op, _)) if op == "get_book"));
    }

    #[tokio::test]
    async fn documents_store_identifier_in_object_id() {
        let store = offline_store().await;
        let oid = ObjectId::new();
        let original = book().with_id("ignored".into());

        let document = store.prepare_document(oid, &original).unwrap();

        assert_eq!(document.get_object_id("_id").unwrap(), oid);
        assert!(document.get("bookId").is_none());
        assert_eq!(document.get_str("title").unwrap(), "Brave New World");

        let restored = store.restore_document(document).unwrap();
        assert_eq!(restored, book().with_id(BookId::from(oid)));
    }
}
