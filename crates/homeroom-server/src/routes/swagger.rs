use super::api;
use super::login;

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder};
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_swagger_ui::SwaggerUi;

struct SecurityAddon;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::v0::status::get_status,
        api::v0::sections::list_sections,
        api::v0::surveys::list_surveys,
        api::v0::surveys::create_survey,
        api::v0::surveys::get_survey,
        api::v0::surveys::update_survey,
        api::v0::surveys::delete_survey,
        api::v0::surveys::set_status,
        api::v0::surveys::preview_survey,
        api::v0::surveys::assignments::list_assignments,
        api::v0::surveys::assignments::assign_survey,
        api::v0::surveys::assignments::update_assignment,
        api::v0::surveys::assignments::remove_assignment,
        api::v0::surveys::results::survey_results,
        api::v0::surveys::results::word_cloud,
        api::v0::student::dashboard,
        api::v0::student::take_survey,
        api::v0::student::save_draft,
        api::v0::student::submit,
        api::v0::student::view_response,
        login::signup,
        login::signin,
        login::whoami,
        login::logout,
    ),
    modifiers(&SecurityAddon),
    tags()
)]
pub(crate) struct ApiDoc;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // the paths above register schemas, so components exist
        let components = openapi.components.as_mut().expect("components not registered");
        components.add_security_scheme(
            "token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Access token from /signin or /signup"))
                    .build(),
            ),
        );
    }
}

pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
