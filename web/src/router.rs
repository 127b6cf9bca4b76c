use crate::{controller::health_check_controller, AppState};
use axum::http::HeaderValue;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::controller::{meeting_controller, translation_controller};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Polyglot Minutes API"
        ),
        paths(
            health_check_controller::health_check,
            meeting_controller::create,
            meeting_controller::create_from_image,
            meeting_controller::index,
            meeting_controller::read,
            meeting_controller::delete,
            translation_controller::translate,
            translation_controller::read,
            translation_controller::export,
        ),
        components(
            schemas(
                domain::meetings::Model,
                domain::translations::Model,
                domain::users::Model,
                crate::params::meeting::CreateParams,
                crate::params::meeting::CreateFromImageParams,
                crate::params::translation::TranslateParams,
                crate::response::meeting::CreatedMeeting,
                crate::response::meeting::CreatedImageMeeting,
                crate::response::meeting::Deleted,
                crate::response::translation::TranslationView,
                crate::response::translation::ExportedDocument,
            )
        ),
        tags(
            (name = "polyglot_minutes", description = "Meeting notes translation & summarization API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    let allowed_origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health_routes())
        .merge(meeting_routes(app_state.clone()))
        .merge(translation_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(cors)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn meeting_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/meetings", post(meeting_controller::create))
        .route("/meetings/image", post(meeting_controller::create_from_image))
        .route("/meetings", get(meeting_controller::index))
        .route("/meetings/:id", get(meeting_controller::read))
        .route("/meetings/:id", delete(meeting_controller::delete))
        .with_state(app_state)
}

fn translation_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/meetings/:id/translations",
            post(translation_controller::translate),
        )
        .route(
            "/meetings/:id/translations/:language",
            get(translation_controller::read),
        )
        .route(
            "/meetings/:id/export/:language",
            get(translation_controller::export),
        )
        .with_state(app_state)
}
