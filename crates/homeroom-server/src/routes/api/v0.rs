pub(crate) mod sections;
pub(crate) mod status;
pub(crate) mod student;
pub(crate) mod surveys;
