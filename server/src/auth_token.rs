use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const MIN_SECRET_LEN: usize = 32;

/// Session tokens are valid for one hour after issuance.
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60);

const JWT_ALGORITHM: &str = "HS256";

#[derive(Debug, thiserror::Error)]
pub enum AuthTokenError {
    #[error("auth token secret is too short (min {MIN_SECRET_LEN} bytes)")]
    SecretTooShort,

    #[error("invalid auth token format")]
    InvalidFormat,

    #[error("unsupported auth token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("auth token signature is invalid")]
    InvalidSignature,

    #[error("auth token is expired")]
    Expired,

    #[error("failed to decode auth token payload")]
    PayloadDecode,

    #[error("failed to parse auth token payload")]
    PayloadParse,
}

/// The identity a caller presents when opening a session.
///
/// Only `email` is required; any other fields are carried through the token
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            extra: Map::new(),
        }
    }
}

/// Decoded token payload: the identity plus issue/expiry timestamps in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityClaims {
    pub email: String,
    pub iat: u64,
    pub exp: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdentityClaims {
    pub fn new(identity: Identity, issued_at: u64, ttl: Duration) -> Self {
        let mut extra = identity.extra;
        // Registered claims are always set by the issuer.
        extra.remove("iat");
        extra.remove("exp");

        Self {
            email: identity.email,
            iat: issued_at,
            exp: issued_at.saturating_add(ttl.as_secs()),
            extra,
        }
    }

    pub fn is_expired(&self, reference_secs: u64) -> bool {
        reference_secs >= self.exp
    }

    pub fn identity(&self) -> Identity {
        Identity {
            email: self.email.clone(),
            extra: self.extra.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JwtHeader {
    alg: String,
    typ: String,
}

/// Issues and verifies HS256 JSON Web Tokens carrying an [`IdentityClaims`].
///
/// There is no server-side session store: a token stays valid until `exp`.
#[derive(Clone)]
pub struct AuthTokenService {
    secret: Arc<[u8]>,
    ttl: Duration,
}

impl AuthTokenService {
    pub fn new(secret: Vec<u8>, ttl: Duration) -> Result<Self, AuthTokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(AuthTokenError::SecretTooShort);
        }

        Ok(Self {
            secret: Arc::<[u8]>::from(secret),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, identity: Identity, issued_at: u64) -> Result<String, AuthTokenError> {
        let claims = IdentityClaims::new(identity, issued_at, self.ttl);
        self.encode(&claims)
    }

    pub fn encode(&self, claims: &IdentityClaims) -> Result<String, AuthTokenError> {
        let header = JwtHeader {
            alg: JWT_ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };
        let header_json =
            serde_json::to_vec(&header).map_err(|_| AuthTokenError::PayloadParse)?;
        let payload_json =
            serde_json::to_vec(claims).map_err(|_| AuthTokenError::PayloadParse)?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(payload_json)
        );
        let signature = self.sign(signing_input.as_bytes())?;
        Ok(format!(
            "{signing_input}.{}",
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    pub fn verify(&self, token: &str, reference_secs: u64) -> Result<IdentityClaims, AuthTokenError> {
        let (signing_input, signature_b64) = token
            .rsplit_once('.')
            .ok_or(AuthTokenError::InvalidFormat)?;
        let (header_b64, payload_b64) = signing_input
            .split_once('.')
            .ok_or(AuthTokenError::InvalidFormat)?;

        let header = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| AuthTokenError::InvalidFormat)?;
        let header: JwtHeader =
            serde_json::from_slice(&header).map_err(|_| AuthTokenError::InvalidFormat)?;
        if header.alg != JWT_ALGORITHM {
            return Err(AuthTokenError::UnsupportedAlgorithm(header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthTokenError::InvalidFormat)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| AuthTokenError::InvalidSignature)?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthTokenError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthTokenError::PayloadDecode)?;

        let claims: IdentityClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthTokenError::PayloadParse)?;

        if claims.is_expired(reference_secs) {
            return Err(AuthTokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, bytes: &[u8]) -> Result<Vec<u8>, AuthTokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| AuthTokenError::InvalidSignature)?;
        mac.update(bytes);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
