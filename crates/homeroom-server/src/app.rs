use crate::permissions::extract;
use crate::routes;
use axum::routing::get;
use axum::{Extension, Router};
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use axum_prometheus::{PrometheusMetricLayer, PrometheusMetricLayerBuilder};
use http::{HeaderValue, Method, header};
use protect_axum::GrantsLayer;
use sea_orm::DatabaseConnection;
use sentry_tower::NewSentryLayer;
use std::sync::OnceLock;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// The recorder is process global, so every app built in this process shares one pair.
fn metrics() -> (PrometheusMetricLayer<'static>, PrometheusHandle) {
    static METRICS: OnceLock<(PrometheusMetricLayer<'static>, PrometheusHandle)> = OnceLock::new();
    METRICS
        .get_or_init(|| {
            PrometheusMetricLayerBuilder::new()
                .with_prefix("api")
                .with_default_metrics()
                .build_pair()
        })
        .clone()
}

fn cors(origins: &[HeaderValue], methods: impl Into<tower_http::cors::AllowMethods>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins.to_vec())
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ORIGIN,
        ])
        .allow_methods(methods)
        .max_age(Duration::from_secs(3600))
}

pub fn create_app(origins: &[String], seaorm_pool: DatabaseConnection) -> anyhow::Result<Router> {
    let (prometheus_layer, metric_handle) = metrics();

    let origins = origins
        .iter()
        .map(|origin| origin.parse())
        .collect::<Result<Vec<HeaderValue>, _>>()?;
    if !origins.is_empty() {
        tracing::info!(?origins, "allowing origins");
    }

    let login_cors = cors(&origins, [Method::GET, Method::POST, Method::OPTIONS]);
    let api_cors = cors(
        &origins,
        [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ],
    );

    let app = Router::new()
        .merge(routes::swagger::create_router())
        .merge(routes::login::create_router().layer(login_cors))
        .nest(
            "/api/v0",
            Router::new()
                .nest("/status", routes::api::v0::status::create_router())
                .nest("/sections", routes::api::v0::sections::create_router())
                .nest("/surveys", routes::api::v0::surveys::create_router())
                .nest("/student", routes::api::v0::student::create_router())
                .layer(api_cors),
        )
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(
            // Router layers are called bottom to top
            // ServiceBuilder layers are called top to bottom
            ServiceBuilder::new()
                .layer(NewSentryLayer::new_from_top())
                .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
                .layer(prometheus_layer)
                .layer(Extension(seaorm_pool))
                .layer(GrantsLayer::with_extractor(extract)),
        )
        .with_state(());
    Ok(app)
}

#[cfg(test)]
mod tests;
