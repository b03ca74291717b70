pub mod auth;

pub use auth::{auth_middleware, TOKEN_COOKIE};
