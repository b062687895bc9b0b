use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Everything a registration request can fail with. The first group is
/// client input, answered with a specific message; the second group is
/// storage/infrastructure, answered generically and logged with detail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Profile picture is required.")]
    MissingFile,
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Password must be at least 8 characters long and contain at least one letter and one number.")]
    WeakPassword,
    #[error("Invalid email format.")]
    InvalidEmail,
    #[error("Invalid date of birth.")]
    InvalidDate,
    #[error("Malformed form data.")]
    MalformedForm(#[source] MultipartError),

    #[error("failed to store uploaded file")]
    StorageWrite(anyhow::Error),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("record rejected by database constraints")]
    SchemaViolation(#[source] sqlx::Error),
    #[error("database error")]
    Persistence(#[from] sqlx::Error),
    #[error("internal error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ApiError::MissingFile
                | ApiError::MissingFields(_)
                | ApiError::PasswordMismatch
                | ApiError::WeakPassword
                | ApiError::InvalidEmail
                | ApiError::InvalidDate
                | ApiError::MalformedForm(_)
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            (StatusCode::BAD_REQUEST, self.to_string()).into_response()
        } else {
            error!(error = ?self, "registration request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Registration failed. Please try again.",
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn client_errors_answer_400_with_specific_message() {
        let resp = ApiError::PasswordMismatch.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(resp).await, "Passwords do not match.");
    }

    #[tokio::test]
    async fn missing_fields_message_names_every_field() {
        let resp = ApiError::MissingFields(vec!["firstName", "gender"]).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(resp).await,
            "Missing required fields: firstName, gender"
        );
    }

    #[tokio::test]
    async fn storage_errors_answer_500_with_generic_message() {
        let resp = ApiError::DuplicateEmail.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(resp).await, "Registration failed. Please try again.");

        let resp = ApiError::StorageWrite(anyhow::anyhow!("disk full")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(resp).await, "Registration failed. Please try again.");
    }
}
