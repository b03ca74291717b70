use actix_web::{delete, get, middleware::from_fn, post, web, HttpResponse};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::documents_response;
use crate::{
    auth_token::IdentityClaims,
    db::{models::json_to_document, BlogDbContext},
    error::{ApiError, Result},
    middleware::auth_middleware,
};

#[derive(Debug, Deserialize)]
pub struct WishlistQuery {
    pub email: Option<String>,
}

#[post("/addWishlist")]
pub async fn add_wishlist(
    item: web::Json<Map<String, Value>>,
    db: web::Data<BlogDbContext>,
) -> Result<HttpResponse> {
    let document = json_to_document(&item)?;
    let result = db.wishlist().insert(document).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Lists the caller's own wishlist.
///
/// The gate has already authenticated the caller; here the requested email
/// must also be the caller's own.
#[get("/wishlist", wrap = "from_fn(auth_middleware)")]
pub async fn list_wishlist(
    query: web::Query<WishlistQuery>,
    claims: web::ReqData<IdentityClaims>,
    db: web::Data<BlogDbContext>,
) -> Result<HttpResponse> {
    if query.email.as_deref() != Some(claims.email.as_str()) {
        log::warn!(
            "{} asked for the wishlist of {:?}",
            claims.email,
            query.email
        );
        return Err(ApiError::AuthMismatch);
    }

    let items = db.wishlist().find_by_email(query.email.as_deref()).await?;
    log::debug!("Listed {} wishlist items for {}", items.len(), claims.email);
    Ok(documents_response(items))
}

#[delete("/wishlist/{id}")]
pub async fn delete_wishlist(
    path: web::Path<String>,
    db: web::Data<BlogDbContext>,
) -> Result<HttpResponse> {
    let id = ObjectId::parse_str(path.as_str())?;
    let result = db.wishlist().delete_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(result))
}
