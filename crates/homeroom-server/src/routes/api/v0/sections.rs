use crate::permissions::Permission;
use crate::routes::api::v0::surveys::error::SurveysError;
use axum::routing::get;
use axum::{Extension, Json, Router};
use homeroom_core::section;
use homeroom_model::section::Section;
use protect_axum::protect;
use sea_orm::DatabaseConnection;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(list_sections)).with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/sections",
    responses(
        (status = OK, body = Vec<Section>, description = "Every class section with its enrollment"),
    ),
    tag = "v0/sections",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn list_sections(
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<Section>>, SurveysError> {
    Ok(Json(section::list_sections(&conn).await?))
}
