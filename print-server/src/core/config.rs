use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every entry can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/print-server | Working directory (data, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | Runtime environment |
/// | REQUEST_TIMEOUT_MS | 30000 | Outbound request timeout (ms) |
/// | LLM_API_URL | https://generativelanguage.googleapis.com | Model API base URL |
/// | LLM_API_KEY | (empty) | Model API key |
/// | LLM_MODEL | gemini-1.5-flash | Model name |
/// | JWT_SECRET | (generated) | JWT signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
/// | ADMIN_PHONE | (unset) | Seed admin account phone |
/// | ADMIN_PASSWORD | (unset) | Seed admin account password |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/print HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding data files and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Outbound request timeout in milliseconds
    pub request_timeout_ms: u64,

    // === Model service ===
    pub llm_api_url: String,
    pub llm_api_key: String,
    pub llm_model: String,

    /// JWT configuration
    pub jwt: JwtConfig,

    // === Seed admin account ===
    pub admin_phone: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/print-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".into()),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or_default(),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".into()),
            jwt: JwtConfig::default(),
            admin_phone: std::env::var("ADMIN_PHONE").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Override the working directory and port, for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
