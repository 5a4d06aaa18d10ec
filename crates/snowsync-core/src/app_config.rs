use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    pub resorts_path: PathBuf,
    /// Endpoint of the headless-render service used to fetch resort pages.
    pub render_url: String,
    pub render_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible chat completions API.
    pub model_base_url: String,
    pub model_api_key: String,
    pub model_id: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub fetch_user_agent: String,
    pub model_timeout_secs: u64,
    /// Number of resort pages processed concurrently within one batch.
    pub batch_size: usize,
    /// Pause between consecutive batches, in milliseconds.
    pub inter_batch_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Consecutive store-connectivity failures tolerated before the run aborts.
    pub store_failure_limit: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("resorts_path", &self.resorts_path)
            .field("database_url", &"[redacted]")
            .field("render_url", &self.render_url)
            .field(
                "render_api_key",
                &self.render_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("model_base_url", &self.model_base_url)
            .field("model_api_key", &"[redacted]")
            .field("model_id", &self.model_id)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("fetch_user_agent", &self.fetch_user_agent)
            .field("model_timeout_secs", &self.model_timeout_secs)
            .field("batch_size", &self.batch_size)
            .field("inter_batch_delay_ms", &self.inter_batch_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("store_failure_limit", &self.store_failure_limit)
            .finish()
    }
}
