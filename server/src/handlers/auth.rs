use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    post, web, HttpResponse,
};
use serde::Serialize;

use crate::{
    auth_token::{now_secs, AuthTokenService, Identity},
    error::Result,
    middleware::TOKEN_COOKIE,
};

/// Attributes of the session cookie that vary by deployment.
#[derive(Debug, Clone, Default)]
pub struct CookiePolicy {
    pub secure: bool,
}

impl CookiePolicy {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    pub fn session_cookie(&self, token: String, max_age_secs: u64) -> Cookie<'static> {
        // Browsers only send SameSite=None cookies over HTTPS.
        let same_site = if self.secure {
            SameSite::None
        } else {
            SameSite::Strict
        };

        Cookie::build(TOKEN_COOKIE, token)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(same_site)
            .max_age(CookieDuration::seconds(max_age_secs as i64))
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
}

/// Sign the submitted identity into a session token and hand it back as the
/// `token` cookie. The identity is trusted as given.
#[post("/jwt")]
pub async fn create_session(
    identity: web::Json<Identity>,
    auth_tokens: web::Data<AuthTokenService>,
    cookie_policy: Option<web::Data<CookiePolicy>>,
) -> Result<HttpResponse> {
    let identity = identity.into_inner();
    log::info!("Issuing session token for {}", identity.email);

    let token = auth_tokens.issue(identity, now_secs())?;

    let cookie = cookie_policy
        .map(|policy| policy.get_ref().clone())
        .unwrap_or_default()
        .session_cookie(token, auth_tokens.ttl().as_secs());

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(SessionResponse { success: true }))
}
