use crate::controller::ApiResponse;
use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::params::translation::TranslateParams;
use crate::response::translation::{ExportedDocument, TranslationView};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{export as ExportApi, translation as TranslationApi, Id};

use log::*;

/// POST translate a Meeting into a target language, serving repeats from cache
#[utoipa::path(
    post,
    path = "/meetings/{id}/translations",
    params(("id" = Id, Path, description = "Meeting id to translate")),
    request_body = TranslateParams,
    responses(
        (status = 200, description = "Translation (cached or newly computed)", body = TranslationView),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Meeting not found"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 502, description = "Language provider unavailable")
    )
)]
pub async fn translate(
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(meeting_id): Path<Id>,
    Json(params): Json<TranslateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "POST Translate Meeting {meeting_id} into {:?}",
        params.target_language
    );

    let translation = TranslationApi::translate(
        app_state.db_conn_ref(),
        app_state.ai.language.as_ref(),
        app_state.ai.summarizer.as_ref(),
        app_state.translation_locks.as_ref(),
        meeting_id,
        &params.target_language,
    )
    .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        TranslationView::from(translation),
    )))
}

/// GET the cached Translation for a (meeting, language) pair, if any
#[utoipa::path(
    get,
    path = "/meetings/{id}/translations/{language}",
    params(
        ("id" = Id, Path, description = "Meeting id"),
        ("language" = String, Path, description = "Target language label")
    ),
    responses(
        (status = 200, description = "The cached Translation", body = TranslationView),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Translation not found")
    )
)]
pub async fn read(
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path((meeting_id, language)): Path<(Id, String)>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Translation for Meeting {meeting_id} into {language}");

    let translation = TranslationApi::find_cached(app_state.db_conn_ref(), meeting_id, &language)
        .await?
        .ok_or_else(|| domain::error::Error::not_found("Translation"))?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        TranslationView::from(translation),
    )))
}

/// GET the rendered export document for an already-cached Translation
#[utoipa::path(
    get,
    path = "/meetings/{id}/export/{language}",
    params(
        ("id" = Id, Path, description = "Meeting id"),
        ("language" = String, Path, description = "Target language label")
    ),
    responses(
        (status = 200, description = "The rendered document", body = ExportedDocument),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Meeting or Translation not found")
    )
)]
pub async fn export(
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path((meeting_id, language)): Path<(Id, String)>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Export for Meeting {meeting_id} into {language}");

    let content = ExportApi::export(app_state.db_conn_ref(), meeting_id, &language).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        ExportedDocument { content },
    )))
}
