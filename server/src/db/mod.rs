//! Document store access.
//!
//! Handlers talk to typed repositories ([`BlogRepository`],
//! [`WishlistRepository`], [`CommentRepository`]) obtained from a
//! [`BlogDbContext`]. Each repository sits on a [`DocumentCollection`], which
//! is implemented by MongoDB in production and by an in-memory store in tests.

pub mod memory;
pub mod models;
pub mod mongo;
pub mod repository;

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::Result;

pub use memory::MemoryCollection;
pub use models::{BlogFields, DeleteResult, InsertResult, UpdateResult};
pub use mongo::MongoCollection;
pub use repository::{BlogDbContext, BlogRepository, CommentRepository, WishlistRepository};

/// A single named collection of schemaless documents.
///
/// Filters are equality matches on top-level fields.
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    async fn insert_one(&self, document: Document) -> Result<InsertResult>;

    async fn find(&self, filter: Document) -> Result<Vec<Document>>;

    async fn find_one(&self, filter: Document) -> Result<Option<Document>>;

    /// `$set` the given fields on the first match, inserting a new document
    /// seeded from the filter when nothing matches.
    async fn upsert_one(&self, filter: Document, fields: Document) -> Result<UpdateResult>;

    async fn delete_one(&self, filter: Document) -> Result<DeleteResult>;
}
