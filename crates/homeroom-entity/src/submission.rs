pub mod answer;
#[allow(clippy::module_inception)]
pub mod submission;
