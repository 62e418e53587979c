use homeroom_entity::access_tokens::{Column as AccessTokenColumn, Entity as AccessToken};
use homeroom_entity::student_profile::{Entity as StudentProfileEntity, Model as StudentProfile};
use homeroom_entity::user::{Column as UserColumn, Entity as UserEntity, Model as User};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_user_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<User>, DbErr> {
        UserEntity::find_by_id(id).one(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, %id, "error loading user");
        })
    }

    /// Case-insensitive, the stored email keeps the casing it was created with.
    pub async fn find_by_email<C: ConnectionTrait>(conn: &C, email: &str) -> Result<Option<User>, DbErr> {
        UserEntity::find()
            .filter(Expr::expr(Func::lower(Expr::col((UserEntity, UserColumn::Email)))).eq(email.to_lowercase()))
            .one(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "error loading user by email"))
    }

    pub async fn find_with_profile<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> Result<Option<(User, Option<StudentProfile>)>, DbErr> {
        UserEntity::find_by_id(id)
            .find_also_related(StudentProfileEntity)
            .one(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %id, "error loading user with profile"))
    }

    pub async fn find_by_token<C: ConnectionTrait>(
        conn: &C,
        token: &str,
    ) -> Result<Option<(User, Option<StudentProfile>)>, DbErr> {
        UserEntity::find()
            .inner_join(AccessToken)
            .filter(AccessTokenColumn::AccessToken.eq(token))
            .find_also_related(StudentProfileEntity)
            .one(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "error finding user by token");
            })
    }
}
