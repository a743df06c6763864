pub mod review;
pub mod school;
pub mod user;

pub use review::{NewReview, Ratings, Review, MAX_RATING};
pub use school::{NewSchool, School};
pub use user::{NewUser, User, UserPatch};
