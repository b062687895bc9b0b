use axum::{
    extract::{multipart::Field, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};

use super::dto::{RawSubmission, UploadedFile};
use super::repo::Registration;
use super::services;
use crate::error::ApiError;
use crate::state::AppState;

pub fn submit_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB
}

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/api/registrations", get(list_registrations))
}

#[instrument(skip(state, multipart))]
pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<&'static str, ApiError> {
    let (mut form, picture) = read_submission(&mut multipart).await?;
    form.email = form.email.trim().to_lowercase();

    services::submit(&state, form, picture).await?;
    Ok("Registration successful!")
}

#[instrument(skip(state))]
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Registration>>, (StatusCode, String)> {
    let records = services::list_all(&state).await.map_err(|e| {
        error!(error = ?e, "list registrations failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error fetching registrations.".to_string(),
        )
    })?;
    Ok(Json(records))
}

async fn text(field: Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(ApiError::MalformedForm)
}

// Part names match the form: text parts fill RawSubmission, the
// profilePicture part becomes the UploadedFile. Unknown parts are skipped.
async fn read_submission(
    multipart: &mut Multipart,
) -> Result<(RawSubmission, Option<UploadedFile>), ApiError> {
    let mut form = RawSubmission::default();
    let mut picture = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::MalformedForm)?
    {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };
        match name.as_str() {
            "firstName" => form.first_name = text(field).await?,
            "lastName" => form.last_name = text(field).await?,
            "password" => form.password = text(field).await?,
            "confirmPassword" => form.confirm_password = text(field).await?,
            "Email" => form.email = text(field).await?,
            "DateOfBirth" => form.date_of_birth = text(field).await?,
            "Gender" => form.gender = text(field).await?,
            "Biography" => form.biography = text(field).await?,
            "profilePicture" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let body = field.bytes().await.map_err(ApiError::MalformedForm)?;
                // Browsers send an empty part when no file was chosen.
                if !body.is_empty() {
                    picture = Some(UploadedFile { filename, body });
                }
            }
            _ => {}
        }
    }

    Ok((form, picture))
}
