use crate::{
    api::{attendance, employee, health},
    config::Config,
    docs::ApiDoc,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{
    HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    middleware::{Condition, NormalizePath, TrailingSlash},
    web,
};
use serde_json::json;
use tracing::{debug, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Collapses repeated slashes but keeps a trailing one, so `/swagger-ui/` still
/// reaches the docs. Each API route lists both forms itself.
pub fn normalize_path() -> NormalizePath {
    NormalizePath::new(TrailingSlash::MergeOnly)
}

pub fn configure_docs(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} to match JS/CSS files
            .url("/api-doc/openapi.json", ApiDoc::openapi()),
    );
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(json_config());
    cfg.app_data(query_config());

    cfg.service(web::resource(["/health", "/health/"]).route(web::get().to(health::health)));

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(rate_limiter(config.rate_per_min))
            .service(
                web::scope("/employees")
                    // /employees/
                    .service(
                        web::resource(["", "/"]).route(web::get().to(employee::list_employees)),
                    )
                    // /employees/create/
                    .service(
                        web::resource(["/create", "/create/"])
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/delete/{id}/
                    .service(
                        web::resource(["/delete/{id}", "/delete/{id}/"])
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance/
                    .service(
                        web::resource(["", "/"]).route(web::get().to(attendance::list_attendance)),
                    )
                    // /attendance/mark/
                    .service(
                        web::resource(["/mark", "/mark/"])
                            .route(web::post().to(attendance::mark_attendance)),
                    ),
            ),
    );
}

/// Per-peer-IP limiter for the API scope; `0` requests per minute turns it off.
fn rate_limiter(requests_per_min: u32) -> Condition<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    let per_ms = 60_000 / u64::from(requests_per_min.max(1));
    let limiter = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms.max(1))
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish();

    match limiter {
        Some(cfg) => Condition::new(requests_per_min > 0, Governor::new(&cfg)),
        None => {
            warn!(requests_per_min, "Invalid rate limit, rate limiting disabled");
            Condition::new(false, Governor::new(&GovernorConfig::default()))
        }
    }
}

/// Malformed bodies answer 400 `{"detail": ...}` instead of actix's plain-text error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        debug!(error = %err, "Rejected request body");
        let body = json!({ "detail": format!("JSON parse error - {err}") });
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req| {
        debug!(error = %err, "Rejected query string");
        let body = json!({ "detail": format!("Query parse error - {err}") });
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}
