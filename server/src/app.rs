//! Route table and request policies shared by the binary and the tests.

use actix_cors::Cors;
use actix_web::{http::header, web};

use crate::error::ApiError;
use crate::handlers;

/// Request bodies larger than this are rejected.
pub const JSON_BODY_LIMIT: usize = 100 * 1024;

/// Register every endpoint.
///
/// Only `GET /wishlist` sits behind the auth gate; the gate is attached on the
/// route itself.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health_check)
        .service(handlers::create_session)
        .service(handlers::add_blog)
        .service(handlers::list_blogs)
        .service(handlers::get_blog)
        .service(handlers::update_blog)
        .service(handlers::list_blogs_by_category)
        .service(handlers::add_wishlist)
        .service(handlers::list_wishlist)
        .service(handlers::delete_wishlist)
        .service(handlers::add_comment)
        .service(handlers::list_comments);
}

/// JSON extractor settings: size limit and errors in the API envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| ApiError::InvalidBody(err.to_string()).into())
}

/// CORS for the single front-end origin, with cookies allowed.
pub fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}
