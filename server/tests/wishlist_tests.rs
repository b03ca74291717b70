mod common;

use actix_web::{cookie::Cookie, http::StatusCode, test};
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use techtrend_server::auth_token::{AuthTokenService, Identity, SESSION_TTL};
use techtrend_server::db::BlogDbContext;

async fn seed(db: &BlogDbContext) {
    let app = test::init_service(common::test_app(db)).await;
    for (email, blog_id) in [
        ("alice@example.com", "b1"),
        ("alice@example.com", "b2"),
        ("bob@example.com", "b1"),
    ] {
        let req = test::TestRequest::post()
            .uri("/addWishlist")
            .set_json(json!({ "user_email": email, "blog_id": blog_id }))
            .to_request();
        let inserted: Value = test::call_and_read_body_json(&app, req).await;
        assert!(inserted["insertedId"].is_string());
    }
}

#[actix_web::test]
async fn test_wishlist_requires_session_cookie() {
    let db = BlogDbContext::in_memory();
    seed(&db).await;
    let app = test::init_service(common::test_app(&db)).await;

    let req = test::TestRequest::get()
        .uri("/wishlist?email=alice@example.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_wishlist_rejects_invalid_tokens() {
    let db = BlogDbContext::in_memory();
    let app = test::init_service(common::test_app(&db)).await;

    let req = test::TestRequest::get()
        .uri("/wishlist?email=alice@example.com")
        .cookie(Cookie::new("token", "garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Signed with a different secret.
    let other = AuthTokenService::new(
        b"another-secret-another-secret-xyz".to_vec(),
        SESSION_TTL,
    )
    .unwrap();
    let forged = other
        .issue(Identity::new("alice@example.com"), techtrend_server::auth_token::now_secs())
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/wishlist?email=alice@example.com")
        .cookie(Cookie::new("token", forged))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_wishlist_rejects_expired_token() {
    let db = BlogDbContext::in_memory();
    let app = test::init_service(common::test_app(&db)).await;

    let issued_two_hours_ago = techtrend_server::auth_token::now_secs() - 2 * 3600;
    let expired = common::token_service()
        .issue(Identity::new("alice@example.com"), issued_two_hours_ago)
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/wishlist?email=alice@example.com")
        .cookie(Cookie::new("token", expired))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_wishlist_forbids_other_users_email() {
    let db = BlogDbContext::in_memory();
    seed(&db).await;
    let app = test::init_service(common::test_app(&db)).await;

    let req = test::TestRequest::get()
        .uri("/wishlist?email=bob@example.com")
        .cookie(common::session_cookie("alice@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Without an email the caller would see everyone's items.
    let req = test::TestRequest::get()
        .uri("/wishlist")
        .cookie(common::session_cookie("alice@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_wishlist_lists_own_items() {
    let db = BlogDbContext::in_memory();
    seed(&db).await;
    let app = test::init_service(common::test_app(&db)).await;

    let req = test::TestRequest::get()
        .uri("/wishlist?email=alice@example.com")
        .cookie(common::session_cookie("alice@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let items: Value = test::read_body_json(resp).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items
        .iter()
        .all(|item| item["user_email"] == "alice@example.com"));
}

#[actix_web::test]
async fn test_delete_wishlist_item() {
    let db = BlogDbContext::in_memory();
    let app = test::init_service(common::test_app(&db)).await;

    let req = test::TestRequest::post()
        .uri("/addWishlist")
        .set_json(json!({ "user_email": "alice@example.com", "blog_id": "b1" }))
        .to_request();
    let inserted: Value = test::call_and_read_body_json(&app, req).await;
    let id = inserted["insertedId"].as_str().unwrap().to_string();

    // No ownership check: any caller may delete.
    let req = test::TestRequest::delete()
        .uri(&format!("/wishlist/{id}"))
        .to_request();
    let result: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result["deletedCount"], 1);

    let req = test::TestRequest::get()
        .uri("/wishlist?email=alice@example.com")
        .cookie(common::session_cookie("alice@example.com"))
        .to_request();
    let items: Value = test::call_and_read_body_json(&app, req).await;
    assert!(items
        .as_array()
        .unwrap()
        .iter()
        .all(|item| item["_id"] != json!(id)));

    let req = test::TestRequest::delete()
        .uri(&format!("/wishlist/{}", ObjectId::new().to_hex()))
        .to_request();
    let result: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result["deletedCount"], 0);
}

#[actix_web::test]
async fn test_delete_with_malformed_id_is_bad_request() {
    let db = BlogDbContext::in_memory();
    let app = test::init_service(common::test_app(&db)).await;

    let req = test::TestRequest::delete()
        .uri("/wishlist/xyz")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
