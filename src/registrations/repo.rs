use serde::{Deserialize, Serialize};
use sqlx::error::ErrorKind;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::error::ApiError;

/// Registration record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub email: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub biography: Option<String>,
    pub profile_picture_path: String,
    pub created_at: OffsetDateTime,
}

/// Insert payload assembled by the service after validation and hashing.
#[derive(Debug)]
pub struct NewRegistration {
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub email: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub biography: Option<String>,
    pub profile_picture_path: String,
}

impl Registration {
    /// Insert one record. The table constraints are the second line of
    /// defense: a duplicate email or a value the pipeline let through is
    /// rejected here.
    pub async fn create(db: &PgPool, new: NewRegistration) -> Result<Registration, ApiError> {
        let inserted = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations
                (first_name, last_name, password_hash, email, date_of_birth,
                 gender, biography, profile_picture_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, first_name, last_name, password_hash, email,
                      date_of_birth, gender, biography, profile_picture_path, created_at
            "#,
        )
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.password_hash)
        .bind(new.email)
        .bind(new.date_of_birth)
        .bind(new.gender)
        .bind(new.biography)
        .bind(new.profile_picture_path)
        .fetch_one(db)
        .await;

        match inserted {
            Ok(record) => Ok(record),
            Err(sqlx::Error::Database(db_err)) => match db_err.kind() {
                ErrorKind::UniqueViolation => Err(ApiError::DuplicateEmail),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    Err(ApiError::SchemaViolation(sqlx::Error::Database(db_err)))
                }
                _ => Err(ApiError::Persistence(sqlx::Error::Database(db_err))),
            },
            Err(e) => Err(ApiError::Persistence(e)),
        }
    }

    /// Every stored record, oldest first.
    pub async fn find_all(db: &PgPool) -> Result<Vec<Registration>, ApiError> {
        let rows = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, first_name, last_name, password_hash, email,
                   date_of_birth, gender, biography, profile_picture_path, created_at
            FROM registrations
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn json_uses_form_field_names_and_hides_the_hash() {
        let record = Registration {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            email: "ada@example.com".into(),
            date_of_birth: Date::from_calendar_date(1815, Month::December, 10).unwrap(),
            gender: "female".into(),
            biography: None,
            profile_picture_path: "uploads/1700000000000-ab12cd34.png".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"firstName\":\"Ada\""));
        assert!(json.contains("\"profilePicturePath\""));
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("secret"));
    }
}
