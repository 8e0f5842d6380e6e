use uuid::Uuid;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Base URL of the downstream workflow controller.
    pub controller_url: String,
    /// Access tokens and the user each resolves to, from `API_TOKENS`
    /// (comma-separated `token:user-uuid` pairs).
    pub api_tokens: Vec<(String, Uuid)>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `5000`                   |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                     |
    /// | `CONTROLLER_URL`        | `http://localhost:8080`  |
    /// | `API_TOKENS`            | (empty)                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let controller_url =
            std::env::var("CONTROLLER_URL").unwrap_or_else(|_| "http://localhost:8080".into());

        let api_tokens = std::env::var("API_TOKENS")
            .map(|raw| Self::parse_api_tokens(&raw))
            .unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            controller_url,
            api_tokens,
        }
    }

    fn parse_api_tokens(raw: &str) -> Vec<(String, Uuid)> {
        raw.split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(|entry| {
                let (token, id) = entry
                    .split_once(':')
                    .unwrap_or_else(|| panic!("malformed API_TOKENS entry: {entry}"));
                let id = Uuid::parse_str(id.trim())
                    .unwrap_or_else(|e| panic!("invalid user id in API_TOKENS entry {entry}: {e}"));
                (token.trim().to_string(), id)
            })
            .collect()
    }
}
