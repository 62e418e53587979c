use homeroom_db::class_section;
use homeroom_model::section::Section;
use homeroom_model_tools::convert::IntoModel;
use sea_orm::{DatabaseConnection, DbErr};

/// All sections, ordered by year and letter, with their enrollment.
pub async fn list_sections(conn: &DatabaseConnection) -> Result<Vec<Section>, DbErr> {
    let counts = class_section::Query::count_students(conn).await?;
    Ok(class_section::Query::list_sections(conn)
        .await?
        .into_iter()
        .map(|section| {
            let students = counts.get(&section.id).copied().unwrap_or_default();
            (section, students).into_model()
        })
        .collect())
}
