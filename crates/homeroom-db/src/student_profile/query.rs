use homeroom_entity::student_profile::{Column, Entity, Model};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(user_id).one(conn).await
    }

    pub async fn count_in_sections<C: ConnectionTrait>(conn: &C, section_ids: Vec<Uuid>) -> Result<u64, DbErr> {
        if section_ids.is_empty() {
            return Ok(0);
        }
        Entity::find()
            .filter(Column::SectionId.is_in(section_ids))
            .count(conn)
            .await
    }
}
