use crate::survey::error::SurveyError;
use homeroom_db::class_section;
use homeroom_db::submission::submission;
use homeroom_db::survey::assignment as assignment_db;
use homeroom_db::survey::survey as survey_db;
use homeroom_model::assignment::{AssignSurvey, Assignment, UpdateAssignment};
use homeroom_model::validation::FieldErrors;
use homeroom_model_tools::convert::{IntoDbModel, IntoModel};
use sea_orm::DatabaseConnection;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

async fn require_assignment(
    conn: &DatabaseConnection,
    owner_id: Uuid,
    survey_id: Uuid,
    assignment_id: Uuid,
) -> Result<homeroom_entity::survey::assignment::Model, SurveyError> {
    survey_db::Query::find_owned(conn, owner_id, survey_id).await?;
    assignment_db::Query::find_by_id(conn, assignment_id)
        .await?
        .filter(|assignment| assignment.survey_id == survey_id)
        .ok_or_else(|| SurveyError::NotFound("assignment not found".to_owned()))
}

pub async fn list_assignments(
    conn: &DatabaseConnection,
    owner_id: Uuid,
    survey_id: Uuid,
) -> Result<Vec<Assignment>, SurveyError> {
    survey_db::Query::find_owned(conn, owner_id, survey_id).await?;
    let submitted = submission::Query::submitted_per_assignment(conn, survey_id).await?;
    Ok(assignment_db::Query::list_for_survey(conn, survey_id)
        .await?
        .into_iter()
        .map(|(assignment, section)| {
            let count = submitted.get(&assignment.id).copied().unwrap_or_default();
            (assignment, section, count).into_model()
        })
        .collect())
}

/// Opens the survey to the given sections, updating assignments that already exist.
pub async fn assign_survey(
    conn: &DatabaseConnection,
    owner_id: Uuid,
    survey_id: Uuid,
    request: AssignSurvey,
) -> Result<Vec<Assignment>, SurveyError> {
    survey_db::Query::find_owned(conn, owner_id, survey_id).await?;

    let mut seen = HashSet::new();
    let section_ids: Vec<Uuid> = request.section_ids.into_iter().filter(|id| seen.insert(*id)).collect();
    let mut errors = FieldErrors::new();
    if section_ids.is_empty() {
        errors.add("section_ids", "Select at least one section.");
    }
    let sections: HashMap<Uuid, _> = class_section::Query::find_by_ids(conn, section_ids.clone())
        .await?
        .into_iter()
        .map(|section| (section.id, section))
        .collect();
    for id in section_ids.iter().filter(|id| !sections.contains_key(id)) {
        errors.add("section_ids", format!("Select a valid choice. {id} is not one of the available choices."));
    }
    errors.into_result().map_err(SurveyError::Validation)?;

    let assignments = assignment_db::Mutation::assign_to_sections(
        conn,
        survey_id,
        section_ids,
        request.status.into_db_model(),
        request.due_at,
    )
    .await?;
    tracing::info!(%survey_id, sections = assignments.len(), status = %request.status, "assigned survey");

    let submitted = submission::Query::submitted_per_assignment(conn, survey_id).await?;
    Ok(assignments
        .into_iter()
        .map(|assignment| {
            let section = sections.get(&assignment.section_id).cloned();
            let count = submitted.get(&assignment.id).copied().unwrap_or_default();
            (assignment, section, count).into_model()
        })
        .collect())
}

pub async fn set_assignment_status(
    conn: &DatabaseConnection,
    owner_id: Uuid,
    survey_id: Uuid,
    assignment_id: Uuid,
    update: UpdateAssignment,
) -> Result<Assignment, SurveyError> {
    require_assignment(conn, owner_id, survey_id, assignment_id).await?;
    let assignment =
        assignment_db::Mutation::set_status(conn, assignment_id, update.status.into_db_model(), update.due_at).await?;
    tracing::info!(%assignment_id, status = %update.status, "updated assignment");

    let section = class_section::Query::find_by_id(conn, assignment.section_id).await?;
    let count = submission::Query::submitted_per_assignment(conn, survey_id)
        .await?
        .get(&assignment_id)
        .copied()
        .unwrap_or_default();
    Ok((assignment, section, count).into_model())
}

/// Removes an assignment nobody has responded to yet.
pub async fn remove_assignment(
    conn: &DatabaseConnection,
    owner_id: Uuid,
    survey_id: Uuid,
    assignment_id: Uuid,
) -> Result<(), SurveyError> {
    require_assignment(conn, owner_id, survey_id, assignment_id).await?;
    assignment_db::Mutation::delete(conn, assignment_id).await?;
    tracing::info!(%assignment_id, "removed assignment");
    Ok(())
}
