use anyhow::Result;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Origins allowed by the CORS layer. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            cors_allowed_origins,
        })
    }
}
