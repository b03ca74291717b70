use async_trait::async_trait;
use futures_util::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};

use super::models::{DeleteResult, InsertResult, UpdateResult};
use super::DocumentCollection;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoCollection {
    collection: Collection<Document>,
}

impl MongoCollection {
    pub fn new(db: &Database, name: &str) -> Self {
        Self {
            collection: db.collection(name),
        }
    }
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    async fn insert_one(&self, document: Document) -> Result<InsertResult> {
        let result = self.collection.insert_one(document).await?;
        Ok(InsertResult::new(result.inserted_id))
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>> {
        let cursor = self.collection.find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        Ok(self.collection.find_one(filter).await?)
    }

    async fn upsert_one(&self, filter: Document, fields: Document) -> Result<UpdateResult> {
        let result = self
            .collection
            .update_one(filter, doc! { "$set": fields })
            .upsert(true)
            .await?;

        Ok(UpdateResult::new(
            result.matched_count,
            result.modified_count,
            result.upserted_id,
        ))
    }

    async fn delete_one(&self, filter: Document) -> Result<DeleteResult> {
        let result = self.collection.delete_one(filter).await?;
        Ok(DeleteResult::new(result.deleted_count))
    }
}
