// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account creation, token acquisition, school browsing and probes.
pub mod auth;
pub mod schools;
pub mod status;

pub use schools::{filter_schools, school_reviews};
pub use status::{health, test_api};
