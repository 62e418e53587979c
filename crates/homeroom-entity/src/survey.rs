pub mod assignment;
pub mod choice;
pub mod likert_question;
pub mod mcq_question;
pub mod question;
pub mod short_answer_question;
#[allow(clippy::module_inception)]
pub mod survey;
