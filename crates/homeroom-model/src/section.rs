use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Section {
    pub id: Uuid,
    #[schema(example = "1st Year")]
    pub year: String,
    #[schema(example = "A")]
    pub letter: String,
    #[schema(example = "1st Year - Section A")]
    pub name: String,
    pub student_count: i64,
}
