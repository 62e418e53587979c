use homeroom_entity::class_section::{Column, Entity, Model};
use homeroom_entity::student_profile;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(conn).await
    }

    pub async fn find_by_year_and_letter<C: ConnectionTrait>(
        conn: &C,
        year: &str,
        letter: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Year.eq(year))
            .filter(Column::Letter.eq(letter))
            .one(conn)
            .await
    }

    pub async fn list_sections<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::Year)
            .order_by_asc(Column::Letter)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to list sections"))
    }

    pub async fn find_by_ids<C: ConnectionTrait>(conn: &C, ids: Vec<Uuid>) -> Result<Vec<Model>, DbErr> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        Entity::find().filter(Column::Id.is_in(ids)).all(conn).await
    }

    /// Number of students enrolled per section. Sections without students are missing from the map.
    pub async fn count_students<C: ConnectionTrait>(conn: &C) -> Result<HashMap<Uuid, i64>, DbErr> {
        let counts: Vec<(Uuid, i64)> = student_profile::Entity::find()
            .select_only()
            .column(student_profile::Column::SectionId)
            .column_as(student_profile::Column::UserId.count(), "students")
            .group_by(student_profile::Column::SectionId)
            .into_tuple()
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to count students"))?;
        Ok(counts.into_iter().collect())
    }
}
