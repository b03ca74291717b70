use actix_web::{get, post, put, web, HttpResponse};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::documents_response;
use crate::{
    db::{
        models::{document_to_json, json_to_document},
        BlogDbContext, BlogFields,
    },
    error::Result,
};

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[post("/addBlog")]
pub async fn add_blog(
    blog: web::Json<Map<String, Value>>,
    db: web::Data<BlogDbContext>,
) -> Result<HttpResponse> {
    let document = json_to_document(&blog)?;
    let result = db.blogs().insert(document).await?;

    log::info!("Created blog {:?}", result.inserted_id);

    Ok(HttpResponse::Ok().json(result))
}

#[get("/blogs")]
pub async fn list_blogs(db: web::Data<BlogDbContext>) -> Result<HttpResponse> {
    let blogs = db.blogs().find_all().await?;
    log::debug!("Listed {} blogs", blogs.len());
    Ok(documents_response(blogs))
}

/// Responds with the blog, or JSON `null` when no blog has that id.
#[get("/blogs/{id}")]
pub async fn get_blog(
    path: web::Path<String>,
    db: web::Data<BlogDbContext>,
) -> Result<HttpResponse> {
    let id = ObjectId::parse_str(path.as_str())?;
    let blog = db.blogs().find_by_id(&id).await?;

    let body = blog.map(document_to_json).unwrap_or(Value::Null);
    Ok(HttpResponse::Ok().json(body))
}

/// Replace the six blog fields, creating the blog when the id is unknown.
#[put("/updateBlog/{id}")]
pub async fn update_blog(
    path: web::Path<String>,
    fields: web::Json<BlogFields>,
    db: web::Data<BlogDbContext>,
) -> Result<HttpResponse> {
    let id = ObjectId::parse_str(path.as_str())?;
    let result = db.blogs().upsert(&id, &fields).await?;

    log::info!(
        "Updated blog {} (matched {}, modified {}, upserted {})",
        id.to_hex(),
        result.matched_count,
        result.modified_count,
        result.upserted_count
    );

    Ok(HttpResponse::Ok().json(result))
}

#[get("/blogCategory")]
pub async fn list_blogs_by_category(
    query: web::Query<CategoryQuery>,
    db: web::Data<BlogDbContext>,
) -> Result<HttpResponse> {
    let blogs = db
        .blogs()
        .find_by_category(query.category.as_deref())
        .await?;
    Ok(documents_response(blogs))
}
