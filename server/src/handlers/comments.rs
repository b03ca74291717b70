use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::documents_response;
use crate::{
    db::{models::json_to_document, BlogDbContext},
    error::Result,
};

/// `?id=` names the blog whose comments are wanted.
#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    pub id: Option<String>,
}

#[post("/addComment")]
pub async fn add_comment(
    comment: web::Json<Map<String, Value>>,
    db: web::Data<BlogDbContext>,
) -> Result<HttpResponse> {
    let document = json_to_document(&comment)?;
    let result = db.comments().insert(document).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[get("/comments")]
pub async fn list_comments(
    query: web::Query<CommentsQuery>,
    db: web::Data<BlogDbContext>,
) -> Result<HttpResponse> {
    let comments = db.comments().find_by_blog_id(query.id.as_deref()).await?;
    Ok(documents_response(comments))
}
