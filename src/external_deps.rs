pub use axum::{
    extract::{Path as UrlPath, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
pub use encoding_rs::WINDOWS_1252;
pub use flexi_logger::{
    Age, Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
};
pub use once_cell::sync::Lazy as once_lazy;
pub use tokio::net::TcpListener;
