use bytes::Bytes;
use time::Date;

/// Text fields of a registration form, exactly as submitted. Absent
/// multipart parts stay empty and are caught by the required-fields check.
#[derive(Debug, Default, Clone)]
pub struct RawSubmission {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: String,
    pub biography: String,
}

/// The uploaded profile picture part.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub body: Bytes,
}

/// A submission that passed every check, with normalized fields. The
/// password is still plaintext here; hashing happens in the service.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub email: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub biography: Option<String>,
}
