use crate::config::GatewayConfig;
use crate::discovery::Catalog;
use crate::registry;
use crate::settings::Settings;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state.
///
/// Built once at startup and read-only afterwards; request handling never
/// mutates it, so it is shared without locking.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration
    pub config: Arc<GatewayConfig>,

    /// Branding served via /set
    pub settings: Arc<Settings>,

    /// Aggregated endpoint metadata
    pub catalog: Arc<Catalog>,

    /// Precomputed /endpoints response; cloned verbatim per read
    pub catalog_response: Value,

    /// Precomputed /set response
    pub settings_response: Value,

    /// Shared outbound client for proxy-style handlers
    pub http: reqwest::Client,

    /// Fixed 404/500 presentations, preloaded from the frontend bundle
    pub error_pages: ErrorPages,

    /// Process start, for uptime reporting
    pub started: Instant,
}

impl AppState {
    pub fn new(config: GatewayConfig, catalog: Catalog) -> anyhow::Result<Self> {
        let settings = Settings::load(Path::new(&config.settings_file));
        let error_pages = ErrorPages::load(Path::new(&config.ui_dir));

        let http = reqwest::Client::builder()
            .user_agent(concat!("restdock/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let catalog_response = registry::envelope(
            StatusCode::OK,
            &settings.author,
            json!({
                "status": true,
                "count": catalog.count,
                "endpoints": catalog.endpoints,
            }),
        );

        let mut settings_payload = json!({ "status": true });
        if let (Value::Object(payload), Ok(Value::Object(fields))) = (
            &mut settings_payload,
            serde_json::to_value(&settings),
        ) {
            payload.extend(fields);
        }
        let settings_response =
            registry::envelope(StatusCode::OK, &settings.author, settings_payload);

        Ok(Self {
            config: Arc::new(config),
            settings: Arc::new(settings),
            catalog: Arc::new(catalog),
            catalog_response,
            settings_response,
            http,
            error_pages,
            started: Instant::now(),
        })
    }
}

/// Fixed error presentations.
///
/// Loaded from `<ui>/err/404.html` and `<ui>/err/500.html` at startup; when
/// an asset is missing the JSON error shape stands in.
#[derive(Clone, Default)]
pub struct ErrorPages {
    not_found: Option<Arc<str>>,
    internal: Option<Arc<str>>,
}

impl ErrorPages {
    pub fn load(ui_dir: &Path) -> Self {
        Self {
            not_found: read_page(&ui_dir.join("err/404.html")),
            internal: read_page(&ui_dir.join("err/500.html")),
        }
    }

    /// Deterministic 404 presentation for unmatched routes
    pub fn not_found(&self) -> Response {
        match &self.not_found {
            Some(page) => (StatusCode::NOT_FOUND, Html(page.to_string())).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": {"code": "NOT_FOUND", "message": "Route not found"}})),
            )
                .into_response(),
        }
    }

    /// Fixed 500 presentation for errors reaching the central path
    pub fn internal_error(&self) -> Response {
        match &self.internal {
            Some(page) => (StatusCode::INTERNAL_SERVER_ERROR, Html(page.to_string())).into_response(),
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": {"code": "INTERNAL_ERROR", "message": "Internal server error"}})),
            )
                .into_response(),
        }
    }
}

fn read_page(path: &Path) -> Option<Arc<str>> {
    match std::fs::read_to_string(path) {
        Ok(page) => Some(page.into()),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "error page unavailable, will answer with JSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_precomputes_catalog_response() {
        let state = AppState::new(GatewayConfig::default(), Catalog::build(&[])).unwrap();
        assert_eq!(state.catalog_response["status"], true);
        assert_eq!(state.catalog_response["count"], 0);
        assert_eq!(state.catalog_response["statusCode"], 200);
    }

    #[test]
    fn test_settings_response_carries_branding() {
        let state = AppState::new(GatewayConfig::default(), Catalog::build(&[])).unwrap();
        assert_eq!(state.settings_response["name"], state.settings.name);
        assert_eq!(state.settings_response["creator"], "restdock");
    }

    #[test]
    fn test_missing_error_pages_fall_back_to_json() {
        let pages = ErrorPages::load(Path::new("no-such-ui"));
        assert_eq!(pages.not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            pages.internal_error().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
