use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::models::{DeleteResult, InsertResult, UpdateResult};
use super::DocumentCollection;
use crate::error::Result;

/// In-process collection used by tests and by `STORE_BACKEND=memory`.
///
/// Mirrors the MongoDB behavior the handlers depend on: generated `_id`s,
/// equality filters (a `null` filter value also matches a missing field) and
/// upserts seeded from the filter.
#[derive(Default)]
pub struct MemoryCollection {
    documents: RwLock<Vec<Document>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match document.get(key) {
        Some(actual) => actual == expected,
        None => *expected == Bson::Null,
    })
}

/// Put `_id` first, generating one when the caller did not supply it.
fn with_id(mut document: Document) -> (Bson, Document) {
    let id = document
        .remove("_id")
        .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));

    let mut stored = Document::new();
    stored.insert("_id", id.clone());
    for (key, value) in document {
        stored.insert(key, value);
    }
    (id, stored)
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn insert_one(&self, document: Document) -> Result<InsertResult> {
        let (id, stored) = with_id(document);
        self.documents.write().await.push(stored);
        Ok(InsertResult::new(id))
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|document| matches(document, &filter))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .find(|document| matches(document, &filter))
            .cloned())
    }

    async fn upsert_one(&self, filter: Document, fields: Document) -> Result<UpdateResult> {
        let mut documents = self.documents.write().await;

        if let Some(existing) = documents
            .iter_mut()
            .find(|document| matches(document, &filter))
        {
            let mut modified = false;
            for (key, value) in fields {
                if existing.get(&key) != Some(&value) {
                    modified = true;
                }
                existing.insert(key, value);
            }
            return Ok(UpdateResult::new(1, u64::from(modified), None));
        }

        let mut seed = filter;
        for (key, value) in fields {
            seed.insert(key, value);
        }
        let (id, stored) = with_id(seed);
        documents.push(stored);
        Ok(UpdateResult::new(0, 0, Some(id)))
    }

    async fn delete_one(&self, filter: Document) -> Result<DeleteResult> {
        let mut documents = self.documents.write().await;
        match documents
            .iter()
            .position(|document| matches(document, &filter))
        {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }
}
