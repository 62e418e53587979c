pub mod account;
pub mod aggregation;
pub mod availability;
pub mod section;
pub mod status;
pub mod submission;
pub mod survey;
pub mod wordcloud;
