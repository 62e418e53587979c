use crate::convert::{FromDbModel, FromModel, IntoModel};
use homeroom_entity::class_section::Model as SectionModel;
use homeroom_entity::survey::assignment::{AssignmentStatus as AssignmentStatusModel, Model as AssignmentModel};
use homeroom_model::assignment::{Assignment, AssignmentStatus};
use homeroom_model::label::status_label;

impl FromDbModel<AssignmentStatusModel> for AssignmentStatus {
    fn from_db_model(model: AssignmentStatusModel) -> Self {
        match model {
            AssignmentStatusModel::Draft => Self::Draft,
            AssignmentStatusModel::Open => Self::Open,
            AssignmentStatusModel::Closed => Self::Closed,
        }
    }
}

impl FromModel<AssignmentStatus> for AssignmentStatusModel {
    fn from_model(model: AssignmentStatus) -> Self {
        match model {
            AssignmentStatus::Draft => Self::Draft,
            AssignmentStatus::Open => Self::Open,
            AssignmentStatus::Closed => Self::Closed,
        }
    }
}

/// The assignment with its section and number of submitted responses.
impl FromDbModel<(AssignmentModel, Option<SectionModel>, i64)> for Assignment {
    fn from_db_model((model, section, submitted_count): (AssignmentModel, Option<SectionModel>, i64)) -> Self {
        Self {
            id: model.id,
            survey_id: model.survey_id,
            section_id: model.section_id,
            section_name: section.map(|section| section.name()).unwrap_or_default(),
            status_label: status_label(model.status),
            status: model.status.into_model(),
            due_at: model.due_at,
            published_at: model.published_at,
            created_at: model.created_at,
            submitted_count,
        }
    }
}
