pub mod auth;
pub mod blogs;
pub mod comments;
pub mod health;
pub mod wishlist;

use actix_web::HttpResponse;
use mongodb::bson::Document;
use serde_json::Value;

use crate::db::models::document_to_json;

pub use auth::{create_session, CookiePolicy};
pub use blogs::{add_blog, get_blog, list_blogs, list_blogs_by_category, update_blog};
pub use comments::{add_comment, list_comments};
pub use health::health_check;
pub use wishlist::{add_wishlist, delete_wishlist, list_wishlist};

/// Respond with a JSON array of stored documents.
fn documents_response(documents: Vec<Document>) -> HttpResponse {
    let body: Vec<Value> = documents.into_iter().map(document_to_json).collect();
    HttpResponse::Ok().json(body)
}
