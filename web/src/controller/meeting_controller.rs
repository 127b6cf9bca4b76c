use crate::controller::ApiResponse;
use crate::extractors::authenticated_user::AuthenticatedUser;
use crate::params::meeting::{CreateFromImageParams, CreateParams};
use crate::response::meeting::{CreatedImageMeeting, CreatedMeeting, Deleted};
use crate::{AppState, Error};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{meeting as MeetingApi, meetings::Model, Id};

use log::*;

/// POST create a new Meeting from typed notes
#[utoipa::path(
    post,
    path = "/meetings",
    request_body = CreateParams,
    responses(
        (status = 201, description = "Successfully created a new Meeting", body = CreatedMeeting),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 502, description = "Language provider unavailable")
    )
)]
pub async fn create(
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a new Meeting from text: {:?}", params.title);

    let meeting = MeetingApi::create_from_text(
        app_state.db_conn_ref(),
        app_state.ai.language.as_ref(),
        user.id,
        &params.title,
        &params.content,
    )
    .await?;

    debug!("New Meeting: {:?}", meeting);

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        CreatedMeeting::from(meeting),
    )))
}

/// POST create a new Meeting from a photographed page of notes
#[utoipa::path(
    post,
    path = "/meetings/image",
    request_body = CreateFromImageParams,
    responses(
        (status = 201, description = "Successfully created a new Meeting from an image", body = CreatedImageMeeting),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 502, description = "OCR provider unavailable")
    )
)]
pub async fn create_from_image(
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(params): Json<CreateFromImageParams>,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "POST Create a new Meeting from image: {:?} ({} declared bytes)",
        params.title, params.file_size
    );

    let blob_store = app_state
        .blob_store
        .as_deref()
        .ok_or_else(|| domain::error::Error::config("No blob store configured"))?;

    let meeting = MeetingApi::create_from_image(
        app_state.db_conn_ref(),
        app_state.ai.ocr.as_ref(),
        blob_store,
        user.id,
        &params.title,
        &params.image_data,
        &params.mime_type,
        params.file_size,
    )
    .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        CreatedImageMeeting::from(meeting),
    )))
}

/// GET all Meetings owned by the caller, newest first
#[utoipa::path(
    get,
    path = "/meetings",
    responses(
        (status = 200, description = "Successfully retrieved all Meetings", body = [Model]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn index(
    AuthenticatedUser(user): AuthenticatedUser,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Meetings for user {}", user.id);

    let meetings = MeetingApi::list_by_user(app_state.db_conn_ref(), user.id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), meetings)))
}

/// GET a single Meeting by id
#[utoipa::path(
    get,
    path = "/meetings/{id}",
    params(("id" = Id, Path, description = "Meeting id to retrieve")),
    responses(
        (status = 200, description = "Successfully retrieved the Meeting", body = Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Meeting not found")
    )
)]
pub async fn read(
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Meeting by id: {id}");

    let meeting = MeetingApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), meeting)))
}

/// DELETE a Meeting and every cached Translation it owns
#[utoipa::path(
    delete,
    path = "/meetings/{id}",
    params(("id" = Id, Path, description = "Meeting id to delete")),
    responses(
        (status = 200, description = "Successfully deleted the Meeting", body = Deleted),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Meeting not found")
    )
)]
pub async fn delete(
    AuthenticatedUser(_user): AuthenticatedUser,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Meeting by id: {id}");

    MeetingApi::delete(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        Deleted { success: true },
    )))
}
