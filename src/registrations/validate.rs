use lazy_static::lazy_static;
use regex::Regex;
use time::macros::format_description;
use time::Date;

use super::dto::{RawSubmission, ValidSubmission};
use crate::error::ApiError;

type Check = fn(&RawSubmission) -> Option<ApiError>;

// Applied in order; the first check that reports anything ends validation.
// Gender values are not checked here, the database constraint has the last
// word on those.
const CHECKS: &[Check] = &[
    require_fields,
    passwords_match,
    password_strength,
    email_shape,
    date_parses,
];

pub fn validate(form: RawSubmission) -> Result<ValidSubmission, ApiError> {
    for check in CHECKS {
        if let Some(err) = check(&form) {
            return Err(err);
        }
    }

    let date_of_birth = parse_birth_date(&form.date_of_birth).ok_or(ApiError::InvalidDate)?;
    let biography = if form.biography.is_empty() {
        None
    } else {
        Some(form.biography)
    };

    Ok(ValidSubmission {
        first_name: form.first_name,
        last_name: form.last_name,
        password: form.password,
        email: form.email,
        date_of_birth,
        gender: form.gender,
        biography,
    })
}

fn require_fields(form: &RawSubmission) -> Option<ApiError> {
    let mut missing = Vec::new();
    for (name, value) in [
        ("firstName", &form.first_name),
        ("lastName", &form.last_name),
        ("password", &form.password),
        ("confirmPassword", &form.confirm_password),
        ("email", &form.email),
        ("dateOfBirth", &form.date_of_birth),
        ("gender", &form.gender),
    ] {
        if value.is_empty() {
            missing.push(name);
        }
    }
    if missing.is_empty() {
        None
    } else {
        Some(ApiError::MissingFields(missing))
    }
}

fn passwords_match(form: &RawSubmission) -> Option<ApiError> {
    (form.password != form.confirm_password).then_some(ApiError::PasswordMismatch)
}

// At least 8 characters with one letter and one digit; symbols are allowed
// but not required.
fn password_strength(form: &RawSubmission) -> Option<ApiError> {
    let p = &form.password;
    let strong = p.chars().count() >= 8
        && p.chars().any(|c| c.is_ascii_alphabetic())
        && p.chars().any(|c| c.is_ascii_digit());
    (!strong).then_some(ApiError::WeakPassword)
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn email_shape(form: &RawSubmission) -> Option<ApiError> {
    (!is_valid_email(&form.email)).then_some(ApiError::InvalidEmail)
}

fn parse_birth_date(raw: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format).ok()
}

fn date_parses(form: &RawSubmission) -> Option<ApiError> {
    parse_birth_date(&form.date_of_birth)
        .is_none()
        .then_some(ApiError::InvalidDate)
}
