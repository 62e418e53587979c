pub mod access_tokens;
pub mod class_section;
pub mod student_profile;
pub mod submission;
pub mod survey;
pub mod user;
