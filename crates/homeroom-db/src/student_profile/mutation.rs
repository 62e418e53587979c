use homeroom_entity::student_profile::{ActiveModel, Model};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create_profile<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        section_id: Uuid,
        study_group: String,
        year_section: String,
    ) -> Result<Model, DbErr> {
        let profile = ActiveModel {
            user_id: ActiveValue::Set(user_id),
            section_id: ActiveValue::Set(section_id),
            study_group: ActiveValue::Set(study_group),
            year_section: ActiveValue::Set(year_section),
        };
        profile.insert(conn).await.inspect_err(
            |error| tracing::error!(error = error as &dyn Error, %user_id, %section_id, "failed to create student profile"),
        )
    }
}
