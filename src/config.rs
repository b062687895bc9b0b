use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Content directory for uploaded profile pictures.
    pub upload_dir: String,
    /// Directory holding the static form and listing pages.
    pub public_dir: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());
        let public_dir = std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".into());
        Ok(Self {
            database_url,
            upload_dir,
            public_dir,
        })
    }
}
