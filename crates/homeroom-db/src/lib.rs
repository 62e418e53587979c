pub mod access_tokens;
pub mod class_section;
pub mod error;
pub mod student_profile;
pub mod submission;
pub mod survey;
pub mod user;
pub mod util;

pub use sea_orm;
