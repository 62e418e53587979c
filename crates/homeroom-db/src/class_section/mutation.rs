use homeroom_entity::class_section::{ActiveModel, Column, Entity, Model};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn get_or_create<C: ConnectionTrait>(conn: &C, year: &str, letter: &str) -> Result<Model, DbErr> {
        let section = ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            year: ActiveValue::Set(year.to_owned()),
            letter: ActiveValue::Set(letter.to_owned()),
        };

        Entity::insert(section)
            .on_conflict(OnConflict::columns([Column::Year, Column::Letter]).do_nothing().to_owned())
            .do_nothing()
            .exec(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, year, letter, "failed to insert class section"),
            )?;

        let res = Entity::find()
            .filter(Column::Year.eq(year))
            .filter(Column::Letter.eq(letter))
            .one(conn)
            .await?;

        res.ok_or_else(|| {
            tracing::error!(year, letter, "class section not found after insertion");
            DbErr::RecordNotFound("class section not found after insertion".to_owned())
        })
    }
}
