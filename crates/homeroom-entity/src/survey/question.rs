use sea_orm::entity::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(255))")]
pub enum QuestionKind {
    #[sea_orm(string_value = "mcq")]
    MultipleChoice,
    #[sea_orm(string_value = "likert")]
    Likert,
    #[sea_orm(string_value = "short_answer")]
    ShortAnswer,
}

impl QuestionKind {
    #[must_use]
    pub fn has_choices(self) -> bool {
        matches!(self, Self::MultipleChoice | Self::Likert)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "question")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub survey_id: Uuid,
    pub position: i32,
    pub prompt: String,
    pub kind: QuestionKind,
    pub required: bool,
    pub survey_version: i32,
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
    #[sea_orm(has_one = "super::mcq_question::Entity")]
    McqQuestion,
    #[sea_orm(has_one = "super::likert_question::Entity")]
    LikertQuestion,
    #[sea_orm(has_one = "super::short_answer_question::Entity")]
    ShortAnswerQuestion,
    #[sea_orm(has_many = "super::choice::Entity")]
    Choice,
}

impl Related<super::survey::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Survey.def()
    }
}

impl Related<super::mcq_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::McqQuestion.def()
    }
}

impl Related<super::likert_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LikertQuestion.def()
    }
}

impl Related<super::short_answer_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShortAnswerQuestion.def()
    }
}

impl Related<super::choice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Choice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
