pub mod assignment;
pub mod question;
#[allow(clippy::module_inception)]
pub mod survey;
