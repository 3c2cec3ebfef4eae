//! REST API server for manuscript analysis.
//!
//! This module provides an Axum-based HTTP server around
//! [`ManuscriptAnalyzer`](crate::ManuscriptAnalyzer). Analysis runs on the blocking
//! thread pool; every failure is rendered as `{ success: false, errorKind, detail, fileInfo? }`
//! with status 400, 422 or 500 depending on the kind.
//!
//! # Endpoints
//!
//! - `POST /analyze` - Analyze an uploaded manuscript (multipart field `file`)
//! - `POST /extract` - Same as `/analyze`, plus the extracted text
//! - `GET /health` - Health check endpoint
//! - `GET /info` - Server information and limits
//!
//! # Examples
//!
//! ## Starting the server
//!
//! ```no_run
//! use quire::api::serve;
//!
//! #[tokio::main]
//! async fn main() -> quire::Result<()> {
//!     serve("127.0.0.1", 8000).await?;
//!     Ok(())
//! }
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! curl -F "file=@manuscript.docx" http://localhost:8000/analyze
//! curl -F "file=@chapter.md;type=text/markdown" http://localhost:8000/extract
//! curl http://localhost:8000/health
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{
    create_router, create_router_with_analyzer, create_router_with_limits, serve, serve_default, serve_with_config,
    serve_with_config_and_limits,
};
pub use types::{
    AnalyzeResponse, ApiSizeLimits, ApiState, ErrorResponse, ExtractResponse, HealthResponse, InfoResponse,
    MULTIPART_OVERHEAD_BYTES,
};
