use tracing::info;

use super::dto::{RawSubmission, UploadedFile};
use super::password::hash_password;
use super::repo::{NewRegistration, Registration};
use super::validate;
use crate::error::ApiError;
use crate::state::AppState;

/// One submission end to end: picture intake, field validation, hashing,
/// persistence. The picture is written before the text fields are checked;
/// a failed validation leaves the stored file behind and nothing cleans it
/// up.
pub async fn submit(
    state: &AppState,
    form: RawSubmission,
    picture: Option<UploadedFile>,
) -> Result<Registration, ApiError> {
    let picture = picture.ok_or(ApiError::MissingFile)?;
    let stored_path = state
        .uploads
        .save(&picture.filename, picture.body)
        .await
        .map_err(ApiError::StorageWrite)?;

    let valid = validate::validate(form)?;
    let password_hash = hash_password(&valid.password).map_err(ApiError::Internal)?;

    let record = Registration::create(
        &state.db,
        NewRegistration {
            first_name: valid.first_name,
            last_name: valid.last_name,
            password_hash,
            email: valid.email,
            date_of_birth: valid.date_of_birth,
            gender: valid.gender,
            biography: valid.biography,
            profile_picture_path: stored_path,
        },
    )
    .await?;

    info!(id = %record.id, email = %record.email, "registration stored");
    Ok(record)
}

pub async fn list_all(state: &AppState) -> Result<Vec<Registration>, ApiError> {
    Registration::find_all(&state.db).await
}
