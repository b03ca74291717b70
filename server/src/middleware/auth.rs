use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, HttpMessage,
};

use crate::auth_token::{now_secs, AuthTokenService};
use crate::error::ApiError;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Identity gate: requires a valid `token` cookie and stores the decoded
/// [`IdentityClaims`](crate::auth_token::IdentityClaims) in the request
/// extensions. Ownership checks are left to the handlers.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let token = match req.cookie(TOKEN_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            log::warn!("Rejected {}: no session cookie", req.path());
            return Err(ApiError::AuthMissing.into());
        }
    };

    let auth_tokens = req
        .app_data::<web::Data<AuthTokenService>>()
        .ok_or_else(|| ApiError::Config("token service not available".to_string()))?;

    let claims = auth_tokens.verify(&token, now_secs()).map_err(|err| {
        log::warn!("Rejected {}: {}", req.path(), err);
        ApiError::AuthInvalid
    })?;

    req.extensions_mut().insert(claims);

    next.call(req).await
}
