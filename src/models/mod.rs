pub mod movie;
pub mod rating;

pub use movie::{Movie, RankedMovie, RejectReason, PLACEHOLDER_POSTER};
pub use rating::{Rating, MAX_RATING, MIN_RATING};
