use sea_orm::entity::prelude::*;
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, AsRefStr, EnumString)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(255))")]
#[strum(serialize_all = "snake_case")]
pub enum AssignmentStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "survey_assignment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub survey_id: Uuid,
    pub section_id: Uuid,
    pub status: AssignmentStatus,
    pub due_at: Option<DateTime>,
    pub published_at: Option<DateTime>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::survey::Entity",
        from = "Column::SurveyId",
        to = "super::survey::Column::Id",
        on_delete = "Cascade"
    )]
    Survey,
    #[sea_orm(
        belongs_to = "crate::class_section::Entity",
        from = "Column::SectionId",
        to = "crate::class_section::Column::Id",
        on_delete = "Cascade"
    )]
    ClassSection,
    #[sea_orm(has_many = "crate::submission::submission::Entity")]
    Submission,
}

impl Related<super::survey::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Survey.def()
    }
}

impl Related<crate::class_section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSection.def()
    }
}

impl Related<crate::submission::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
