// handlers/public/auth/mod.rs - Token acquisition and signup
pub mod login;
pub mod refresh;
pub mod signup;

pub use login::login_post;
pub use refresh::refresh_post;
pub use signup::signup_post;
