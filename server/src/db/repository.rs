use std::sync::Arc;

use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Client,
};

use super::memory::MemoryCollection;
use super::models::{BlogFields, DeleteResult, InsertResult, UpdateResult};
use super::mongo::MongoCollection;
use super::DocumentCollection;
use crate::error::Result;

pub const BLOGS_COLLECTION: &str = "blogs";
pub const WISHLIST_COLLECTION: &str = "wishlist";
pub const COMMENTS_COLLECTION: &str = "comment";

/// Shared handle to the three blog collections.
///
/// Opened once at startup; cloning is cheap and every clone talks to the same
/// underlying client or in-memory store.
#[derive(Clone)]
pub struct BlogDbContext {
    client: Option<Client>,
    blogs: Arc<dyn DocumentCollection>,
    wishlist: Arc<dyn DocumentCollection>,
    comments: Arc<dyn DocumentCollection>,
}

impl BlogDbContext {
    pub fn new(client: Client, database_name: &str) -> Self {
        let db = client.database(database_name);

        Self {
            blogs: Arc::new(MongoCollection::new(&db, BLOGS_COLLECTION)),
            wishlist: Arc::new(MongoCollection::new(&db, WISHLIST_COLLECTION)),
            comments: Arc::new(MongoCollection::new(&db, COMMENTS_COLLECTION)),
            client: Some(client),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            client: None,
            blogs: Arc::new(MemoryCollection::new()),
            wishlist: Arc::new(MemoryCollection::new()),
            comments: Arc::new(MemoryCollection::new()),
        }
    }

    /// Round-trip to the deployment. Always succeeds for the in-memory store.
    pub async fn ping(&self) -> Result<()> {
        if let Some(client) = &self.client {
            client
                .database("admin")
                .run_command(doc! { "ping": 1 })
                .await?;
        }
        Ok(())
    }

    pub fn blogs(&self) -> BlogRepository {
        BlogRepository {
            collection: Arc::clone(&self.blogs),
        }
    }

    pub fn wishlist(&self) -> WishlistRepository {
        WishlistRepository {
            collection: Arc::clone(&self.wishlist),
        }
    }

    pub fn comments(&self) -> CommentRepository {
        CommentRepository {
            collection: Arc::clone(&self.comments),
        }
    }
}

#[derive(Clone)]
pub struct BlogRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl BlogRepository {
    pub async fn insert(&self, blog: Document) -> Result<InsertResult> {
        self.collection.insert_one(blog).await
    }

    pub async fn find_all(&self) -> Result<Vec<Document>> {
        self.collection.find(doc! {}).await
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Document>> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    pub async fn find_by_category(&self, category: Option<&str>) -> Result<Vec<Document>> {
        let filter = match category {
            Some(category) => doc! { "category": category },
            None => doc! {},
        };
        self.collection.find(filter).await
    }

    pub async fn upsert(&self, id: &ObjectId, fields: &BlogFields) -> Result<UpdateResult> {
        self.collection
            .upsert_one(doc! { "_id": id }, fields.to_document()?)
            .await
    }
}

#[derive(Clone)]
pub struct WishlistRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl WishlistRepository {
    pub async fn insert(&self, item: Document) -> Result<InsertResult> {
        self.collection.insert_one(item).await
    }

    pub async fn find_by_email(&self, user_email: Option<&str>) -> Result<Vec<Document>> {
        let filter = match user_email {
            Some(email) => doc! { "user_email": email },
            None => doc! {},
        };
        self.collection.find(filter).await
    }

    pub async fn delete_by_id(&self, id: &ObjectId) -> Result<DeleteResult> {
        self.collection.delete_one(doc! { "_id": id }).await
    }
}

#[derive(Clone)]
pub struct CommentRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl CommentRepository {
    pub async fn insert(&self, comment: Document) -> Result<InsertResult> {
        self.collection.insert_one(comment).await
    }

    pub async fn find_by_blog_id(&self, blog_id: Option<&str>) -> Result<Vec<Document>> {
        let filter = match blog_id {
            Some(blog_id) => doc! { "blog_id": blog_id },
            None => doc! {},
        };
        self.collection.find(filter).await
    }
}
