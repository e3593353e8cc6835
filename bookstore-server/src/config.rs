//! Command line and environment configuration.

use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};

use bookstore::{
    file::FileStore,
    mongodb::{DEFAULT_COLLECTION, DEFAULT_DATABASE, MongoDbStore},
    prelude::*,
};

/// Storage backend serving the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// A single JSON file on local disk.
    File,
    /// A MongoDB collection.
    Mongodb,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "bookstore-server", about = "JSON HTTP API for a book catalogue")]
pub struct ServerConfig {
    /// Storage backend. Defaults to mongodb when a MongoDB URI is configured, file otherwise.
    #[arg(long, value_enum, env = "BOOKSTORE_BACKEND")]
    pub backend: Option<BackendKind>,

    /// Listen address.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Listen port.
    #[arg(long, env = "PORT", default_value_t = 5001)]
    pub port: u16,

    /// Book file used by the file backend.
    #[arg(long, default_value = "books.json")]
    pub file: PathBuf,

    /// MongoDB connection string.
    #[arg(long, env = "MONGODB_URI")]
    pub mongodb_uri: Option<String>,

    #[arg(long, default_value = DEFAULT_DATABASE)]
    pub database: String,

    #[arg(long, default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Deadline for each MongoDB operation, in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Create the bundled sample books at startup.
    #[arg(long)]
    pub seed: bool,
}

impl ServerConfig {
    /// The backend to build, falling back on the presence of a MongoDB URI.
    pub fn backend_kind(&self) -> BackendKind {
        match (self.backend, &self.mongodb_uri) {
            (Some(kind), _) => kind,
            (None, Some(_)) => BackendKind::Mongodb,
            (None, None) => BackendKind::File,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the configured backend behind a dynamically dispatched store.
    ///
    /// # Errors
    ///
    /// Returns [`BookStoreError::Initialization`] when the mongodb backend is selected
    /// without a connection string, or whatever the backend builder reports.
    pub async fn build_store(&self) -> BookStoreResult<DynBookStore> {
        match self.backend_kind() {
            BackendKind::File => {
                let backend = FileStore::builder(&self.file).build().await?;

                tracing::info!(path = %self.file.display(), "using file backend");

                Ok(BookStore::new(backend).into_dyn())
            }
            BackendKind::Mongodb => {
                let uri = self.mongodb_uri.as_deref().ok_or_else(|| {
                    BookStoreError::Initialization(
                        "a MongoDB URI is required for the mongodb backend".into(),
                    )
                })?;
                let backend = MongoDbStore::builder(uri, &self.database)
                    .collection(&self.collection)
                    .timeout(self.timeout())
                    .build()
                    .await?;

                tracing::info!(database = %self.database, collection = %self.collection, "using mongodb backend");

                Ok(BookStore::new(backend).into_dyn())
            }
        }
    }
}
