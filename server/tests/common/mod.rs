#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    cookie::Cookie,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use techtrend_server::{
    app,
    auth_token::{now_secs, AuthTokenService, Identity, SESSION_TTL},
    db::BlogDbContext,
    handlers::CookiePolicy,
};

pub const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-secret!";
pub const TEST_ORIGIN: &str = "http://localhost:5173";

pub fn token_service() -> AuthTokenService {
    AuthTokenService::new(TEST_SECRET.to_vec(), SESSION_TTL).expect("valid secret")
}

pub fn test_app(
    db: &BlogDbContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(db.clone()))
        .app_data(web::Data::new(token_service()))
        .app_data(web::Data::new(CookiePolicy::new(false)))
        .app_data(app::json_config())
        .wrap(app::cors(TEST_ORIGIN))
        .configure(app::configure)
}

/// A `token` cookie for `email`, issued now.
pub fn session_cookie(email: &str) -> Cookie<'static> {
    let token = token_service()
        .issue(Identity::new(email), now_secs())
        .expect("issue token");
    Cookie::new("token", token)
}
