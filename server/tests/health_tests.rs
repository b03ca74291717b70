mod common;

use actix_web::{http::header, test};
use techtrend_server::db::BlogDbContext;

#[actix_web::test]
async fn test_root_reports_running() {
    let db = BlogDbContext::in_memory();
    let app = test::init_service(common::test_app(&db)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = test::read_body(resp).await;
    assert_eq!(body, "tech server is running");
}

#[actix_web::test]
async fn test_cors_preflight_allows_credentials_for_client_origin() {
    let db = BlogDbContext::in_memory();
    let app = test::init_service(common::test_app(&db)).await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/wishlist")
        .insert_header((header::ORIGIN, common::TEST_ORIGIN))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        common::TEST_ORIGIN
    );
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}
