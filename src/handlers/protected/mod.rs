// handlers/protected/mod.rs - Handlers behind jwt_auth_middleware
//
// Every handler here receives the caller as an explicit `AuthUser`.
pub mod reviews;
pub mod user;

pub use reviews::review_post;
pub use user::{change_password_post, user_get, user_patch};
