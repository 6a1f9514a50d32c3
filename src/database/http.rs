//! HTTP document store
//!
//! This module provides a store that talks to a REST document endpoint.
//! It is only available when the `http` feature is enabled.
//!
//! Endpoints, relative to the connection target:
//! - `POST {base}/{database}/{collection}/documents` with a JSON array body
//! - `GET {base}/{database}/{collection}/count` returning `{"count": n}`
//!
//! # Example
//!
//! ```rust,no_run
//! use docloader::database::http::HttpStore;
//! use docloader::database::DocumentStore;
//!
//! let mut store = HttpStore::new("http://127.0.0.1:8080", "shop", "orders").unwrap();
//! println!("{} documents", store.count().unwrap());
//! ```

use crate::database::storage::{check_name, DocumentStore};
use crate::error::StoreError;
use crate::types::Document;
use reqwest::blocking::Client;
use serde::Deserialize;

/// Count endpoint response
#[derive(Debug, Deserialize)]
pub struct CountResponse {
    /// Documents in the collection
    pub count: u64,
}

/// Blocking REST store client
pub struct HttpStore {
    client: Client,
    collection_url: String,
}

impl HttpStore {
    /// Create a client for `database`/`collection` under `base_url`
    ///
    /// No request is made until the first insert or count.
    pub fn new(base_url: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        check_name("database", database)?;
        check_name("collection", collection)?;

        Ok(Self {
            client: Client::builder().build()?,
            collection_url: collection_url(base_url, database, collection),
        })
    }

    /// URL of the collection resource
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }
}

fn collection_url(base_url: &str, database: &str, collection: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        database,
        collection
    )
}

impl DocumentStore for HttpStore {
    fn insert_many(&mut self, documents: &[Document]) -> Result<(), StoreError> {
        let url = format!("{}/documents", self.collection_url);
        let response = self.client.post(&url).json(documents).send()?;

        if !response.status().is_success() {
            return Err(StoreError::Rejected(format!(
                "insert returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    fn count(&mut self) -> Result<u64, StoreError> {
        let url = format!("{}/count", self.collection_url);
        let response = self.client.get(&url).send()?;

        if !response.status().is_success() {
            return Err(StoreError::Rejected(format!(
                "count returned {}",
                response.status()
            )));
        }
        let body: CountResponse = response.json()?;
        Ok(body.count)
    }

    fn name(&self) -> &str {
        "http"
    }
}
