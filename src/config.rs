use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:studentintro.db".into());
        let secure_cookies = std::env::var("SECURE_COOKIES")
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);
        Ok(Self {
            database_url,
            secure_cookies,
        })
    }
}
