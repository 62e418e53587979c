pub mod assignment;
pub mod label;
pub mod login;
pub mod results;
pub mod section;
pub mod status;
pub mod submission;
pub mod survey;
pub mod user;
pub mod validation;
