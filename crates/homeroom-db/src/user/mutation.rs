use crate::error::Error as DbError;
use crate::user::Query;
use crate::util::{FlattenTransactionResultExt, now};
use crate::{class_section, student_profile};
use homeroom_entity::student_profile::Model as StudentProfile;
use homeroom_entity::user::{ActiveModel, Entity, Model, Role};
use paste::paste;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, TransactionTrait};
use std::error::Error;
use uuid::Uuid;

pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: Role,
}

pub struct NewStudentProfile {
    pub year: String,
    pub section: String,
    pub group: String,
    pub year_section: String,
}

pub struct Mutation;

macro_rules! update_user_field {
    ($i:ident, $t:ty) => {
        paste! {
            pub async fn [<update_user_ $i>]<C: ConnectionTrait>(conn: &C, user_id: Uuid, $i: $t) -> Result<Model, DbErr> {
                let user = ActiveModel {
                    id: ActiveValue::Unchanged(user_id),
                    $i: ActiveValue::Set($i),
                    ..<homeroom_entity::user::ActiveModel as std::default::Default>::default()
                };
                user.update(conn).await.inspect_err(|error| {
                    tracing::error!(error = error as &dyn Error, %user_id, field = stringify!($i), "failed to update user");
                })
            }
        }
    };
}

impl Mutation {
    pub async fn create_user<C: ConnectionTrait>(conn: &C, user: NewUser) -> Result<Model, DbErr> {
        let new_user = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            password_hash: Set(user.password_hash),
            role: Set(user.role),
            created_at: Set(now()),
        };

        Entity::insert(new_user)
            .exec_with_returning(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to create user"))
    }

    /// Creates a student together with the section membership in one transaction.
    pub async fn create_student<C: TransactionTrait>(
        conn: &C,
        user: NewUser,
        profile: NewStudentProfile,
    ) -> Result<(Model, StudentProfile), DbError> {
        conn.transaction(|txn| {
            Box::pin(async move {
                if Query::find_by_email(txn, &user.email).await?.is_some() {
                    return Err(DbError::EmailTaken(user.email));
                }
                let user = Self::create_user(txn, user).await?;
                let section = class_section::Mutation::get_or_create(txn, &profile.year, &profile.section).await?;
                let profile = student_profile::Mutation::create_profile(
                    txn,
                    user.id,
                    section.id,
                    profile.group,
                    profile.year_section,
                )
                .await?;
                tracing::info!(user_id = %user.id, section_id = %section.id, "created student");
                Ok((user, profile))
            })
        })
        .await
        .flatten_res()
    }

    update_user_field!(email, String);
    update_user_field!(first_name, String);
    update_user_field!(last_name, String);
    update_user_field!(password_hash, String);
    update_user_field!(role, Role);

    pub async fn delete<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<(), DbErr> {
        let res = Entity::delete_by_id(user_id).exec(conn).await;
        if let Err(error) = res {
            tracing::error!(error = &error as &dyn Error, %user_id, "failed to delete user");
            return Err(error);
        }
        Ok(())
    }
}
