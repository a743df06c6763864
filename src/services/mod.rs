pub mod account_service;
pub mod school_service;

pub use account_service::{AccountError, AccountService, ChangePasswordRequest, SignupRequest};
pub use school_service::{SchoolError, SchoolService};
