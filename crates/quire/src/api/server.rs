//! API server setup and configuration.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::analyzer::ManuscriptAnalyzer;
use crate::{AnalysisConfig, QuireError, Result};

use super::{
    handlers::{analyze_handler, extract_handler, health_handler, info_handler},
    types::{ApiSizeLimits, ApiState},
};

/// Parse size limits from environment variables.
///
/// Reads environment variables in the following order of preference:
/// 1. `QUIRE_MAX_REQUEST_BODY_BYTES` - Maximum total request body size (in bytes)
/// 2. `QUIRE_MAX_UPLOAD_SIZE_MB` - (Legacy) Maximum request body size in MB
///
/// Falls back to limits derived from `config` if neither is set or valid.
fn parse_size_limits_from_env(config: &AnalysisConfig) -> ApiSizeLimits {
    if let Ok(value) = std::env::var("QUIRE_MAX_REQUEST_BODY_BYTES") {
        match value.parse::<usize>() {
            Ok(bytes) if bytes > 0 => {
                tracing::info!(bytes, "Request body limit configured from environment");
                return ApiSizeLimits::new(bytes);
            }
            Ok(_) => tracing::warn!("Invalid QUIRE_MAX_REQUEST_BODY_BYTES value (must be > 0)"),
            Err(_) => tracing::warn!(
                "Failed to parse QUIRE_MAX_REQUEST_BODY_BYTES='{}', must be a valid usize",
                value
            ),
        }
    }

    if let Ok(value) = std::env::var("QUIRE_MAX_UPLOAD_SIZE_MB") {
        match value.parse::<usize>() {
            Ok(mb) if mb > 0 => {
                tracing::info!(mb, "Request body limit configured from environment (legacy)");
                return ApiSizeLimits::from_mb(mb);
            }
            Ok(_) => tracing::warn!("Invalid QUIRE_MAX_UPLOAD_SIZE_MB value (must be > 0)"),
            Err(_) => tracing::warn!(
                "Failed to parse QUIRE_MAX_UPLOAD_SIZE_MB='{}', must be a valid usize",
                value
            ),
        }
    }

    let limits = ApiSizeLimits::for_config(config);
    tracing::info!(
        bytes = limits.max_request_body_bytes,
        "Request body limit derived from max_upload_bytes - configure with QUIRE_MAX_REQUEST_BODY_BYTES or QUIRE_MAX_UPLOAD_SIZE_MB"
    );
    limits
}

fn cors_layer_from_env() -> CorsLayer {
    // Permissive by default; set QUIRE_CORS_ORIGINS in production.
    if let Ok(origins_str) = std::env::var("QUIRE_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            return CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any);
        }

        tracing::warn!(
            "QUIRE_CORS_ORIGINS set but empty/invalid - falling back to permissive CORS. \
             Set explicit origins for production."
        );
    } else {
        tracing::warn!(
            "CORS configured to allow all origins (default). For production, set QUIRE_CORS_ORIGINS \
             to a comma-separated list of allowed origins (e.g., 'https://app.example.com')"
        );
    }

    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

/// Create the API router with all routes configured.
///
/// The request body limit is derived from `config.max_upload_bytes`. This is public
/// to allow users to embed the router in their own applications.
///
/// # Examples
///
/// ```no_run
/// use quire::{AnalysisConfig, api::create_router};
/// use axum::Router;
///
/// # #[tokio::main]
/// # async fn main() {
/// let router = create_router(AnalysisConfig::default());
///
/// // Nest under /api prefix
/// let app: Router = Router::new().nest("/api", router);
/// # }
/// ```
pub fn create_router(config: AnalysisConfig) -> Router {
    let limits = ApiSizeLimits::for_config(&config);
    create_router_with_limits(config, limits)
}

/// Create the API router with custom size limits.
///
/// # Examples
///
/// ```no_run
/// use quire::{AnalysisConfig, api::{create_router_with_limits, ApiSizeLimits}};
///
/// # #[tokio::main]
/// # async fn main() {
/// let router = create_router_with_limits(AnalysisConfig::default(), ApiSizeLimits::from_mb(20));
/// # }
/// ```
pub fn create_router_with_limits(config: AnalysisConfig, limits: ApiSizeLimits) -> Router {
    create_router_with_analyzer(ManuscriptAnalyzer::new(config), limits)
}

/// Create the API router around a prepared analyzer, e.g. one with custom extractors.
pub fn create_router_with_analyzer(analyzer: ManuscriptAnalyzer, limits: ApiSizeLimits) -> Router {
    let state = ApiState {
        analyzer: Arc::new(analyzer),
        limits,
    };

    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/extract", post(extract_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(cors_layer_from_env())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server with config file discovery.
///
/// Searches for `quire.toml` in current and parent directories. If no config file is
/// found, uses default configuration.
///
/// # Environment Variables
///
/// ```bash
/// # CORS (default: allow all origins)
/// export QUIRE_CORS_ORIGINS="https://app.example.com,https://admin.example.com"
///
/// # Request body limit (default: max_upload_bytes + 1 MiB)
/// export QUIRE_MAX_REQUEST_BODY_BYTES=53477376
/// export QUIRE_MAX_UPLOAD_SIZE_MB=51  # legacy
/// ```
///
/// # Examples
///
/// ```no_run
/// use quire::api::serve;
///
/// #[tokio::main]
/// async fn main() -> quire::Result<()> {
///     serve("127.0.0.1", 8000).await?;
///     Ok(())
/// }
/// ```
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let config = match AnalysisConfig::discover()? {
        Some(config) => {
            tracing::info!("Loaded analysis config from discovered file");
            config
        }
        None => {
            tracing::info!("No config file found, using default configuration");
            AnalysisConfig::default()
        }
    };

    serve_with_config(host, port, config).await
}

/// Start the API server with explicit config.
///
/// Size limits come from the environment, or are derived from `config`.
pub async fn serve_with_config(host: impl AsRef<str>, port: u16, config: AnalysisConfig) -> Result<()> {
    let limits = parse_size_limits_from_env(&config);
    serve_with_config_and_limits(host, port, config, limits).await
}

/// Start the API server with explicit config and size limits.
///
/// # Examples
///
/// ```no_run
/// use quire::{AnalysisConfig, api::{serve_with_config_and_limits, ApiSizeLimits}};
///
/// #[tokio::main]
/// async fn main() -> quire::Result<()> {
///     let config = AnalysisConfig::from_toml_file("config/quire.toml")?;
///     serve_with_config_and_limits("127.0.0.1", 8000, config, ApiSizeLimits::from_mb(60)).await?;
///     Ok(())
/// }
/// ```
pub async fn serve_with_config_and_limits(
    host: impl AsRef<str>,
    port: u16,
    config: AnalysisConfig,
    limits: ApiSizeLimits,
) -> Result<()> {
    config.validate()?;

    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| QuireError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);
    let app = create_router_with_limits(config, limits);

    tracing::info!("Starting Quire API server on http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(QuireError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| QuireError::Other(e.to_string()))?;

    Ok(())
}

/// Start the API server with default host and port.
///
/// Defaults: host = "127.0.0.1", port = 8000
pub async fn serve_default() -> Result<()> {
    serve("127.0.0.1", 8000).await
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;

    fn clear_limit_env() {
        unsafe {
            std::env::remove_var("QUIRE_MAX_REQUEST_BODY_BYTES");
            std::env::remove_var("QUIRE_MAX_UPLOAD_SIZE_MB");
        }
    }

    #[test]
    fn test_create_router() {
        let _router = create_router(AnalysisConfig::default());
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_size_limits_default_from_config() {
        clear_limit_env();

        let config = AnalysisConfig {
            max_upload_bytes: 1000,
            ..AnalysisConfig::default()
        };
        let limits = parse_size_limits_from_env(&config);
        assert_eq!(limits.max_request_body_bytes, 1000 + 1024 * 1024);
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_size_limits_from_bytes_env_var() {
        clear_limit_env();
        unsafe {
            std::env::set_var("QUIRE_MAX_REQUEST_BODY_BYTES", "2097152");
        }

        let limits = parse_size_limits_from_env(&AnalysisConfig::default());
        assert_eq!(limits.max_request_body_bytes, 2 * 1024 * 1024);

        clear_limit_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_size_limits_from_legacy_mb_env_var() {
        clear_limit_env();
        unsafe {
            std::env::set_var("QUIRE_MAX_UPLOAD_SIZE_MB", "75");
        }

        let limits = parse_size_limits_from_env(&AnalysisConfig::default());
        assert_eq!(limits.max_request_body_bytes, 75 * 1024 * 1024);

        clear_limit_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_size_limits_invalid_values_fall_back() {
        clear_limit_env();
        unsafe {
            std::env::set_var("QUIRE_MAX_REQUEST_BODY_BYTES", "not a number");
            std::env::set_var("QUIRE_MAX_UPLOAD_SIZE_MB", "0");
        }

        let limits = parse_size_limits_from_env(&AnalysisConfig::default());
        assert_eq!(limits, ApiSizeLimits::default());

        clear_limit_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_size_limits_bytes_take_precedence() {
        clear_limit_env();
        unsafe {
            std::env::set_var("QUIRE_MAX_REQUEST_BODY_BYTES", "1048576");
            std::env::set_var("QUIRE_MAX_UPLOAD_SIZE_MB", "500");
        }

        let limits = parse_size_limits_from_env(&AnalysisConfig::default());
        assert_eq!(limits.max_request_body_bytes, 1024 * 1024);

        clear_limit_env();
    }

    #[tokio::test]
    async fn test_serve_rejects_invalid_host() {
        let err = serve_with_config_and_limits("not-an-ip", 0, AnalysisConfig::default(), ApiSizeLimits::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid host address"));
    }
}
