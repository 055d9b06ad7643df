//! API configuration.

use std::path::PathBuf;

use vsep_models::DEFAULT_SEGMENT_LIMIT;

/// Which separation backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice {
    /// Passthrough separation, spectral gate only.
    Cpu,
    /// Remote Demucs inference service.
    Remote,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second
    pub rate_limit_rps: u32,
    /// Max request body size (uploads are whole audio files)
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Separation backend to wire in
    pub backend: BackendChoice,
    /// Sample rate every upload is decoded to
    pub sample_rate: u32,
    /// Directory produced stems are written to
    pub output_dir: PathBuf,
    /// Max segments inlined into a report
    pub segment_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 10,
            max_body_size: 50 * 1024 * 1024, // 50MB
            environment: "development".to_string(),
            backend: BackendChoice::Cpu,
            sample_rate: 22050,
            output_dir: std::env::temp_dir().join("vsep-stems"),
            segment_limit: DEFAULT_SEGMENT_LIMIT,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_rps),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            backend: match std::env::var("SEPARATOR_BACKEND").as_deref() {
                Ok("remote") => BackendChoice::Remote,
                _ => BackendChoice::Cpu,
            },
            sample_rate: std::env::var("DECODE_SAMPLE_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.sample_rate),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            segment_limit: std::env::var("SEGMENT_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.segment_limit),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
