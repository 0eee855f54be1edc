//! Compiled-in handler registry.
//!
//! Handlers are ordinary Rust modules registered by name in [`builtin`]. An
//! endpoint manifest on disk binds a route position to one of these names;
//! the manifest carries the display metadata, the registry carries the code.
//! This replaces runtime module loading: adding a handler means implementing
//! [`ApiHandler`], registering it here, and dropping a manifest into the api
//! tree.

mod anime;
mod hello;
mod lyrics;

use crate::error::GatewayResult;
use crate::settings::Settings;
use crate::state::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Name → handler map consulted when validating endpoint manifests
pub type HandlerRegistry = HashMap<&'static str, Arc<dyn ApiHandler>>;

/// The contract every endpoint handler satisfies.
///
/// A handler receives one [`CallContext`] bundling the request data and the
/// response-building capabilities, and produces exactly one response. Errors
/// propagate to the registrar's central error path; handlers never need their
/// own catch-all.
#[async_trait]
pub trait ApiHandler: Send + Sync {
    async fn handle(&self, cx: CallContext) -> GatewayResult<Response>;
}

/// All built-in handlers, keyed by the name manifests refer to them with
pub fn builtin() -> HandlerRegistry {
    let mut handlers: HandlerRegistry = HashMap::new();
    handlers.insert("hello", Arc::new(hello::Hello));
    handlers.insert("lyrics", Arc::new(lyrics::Lyrics));
    handlers.insert("anime-image", Arc::new(anime::AnimeImage));
    handlers
}

/// Per-invocation bundle of request data and response capabilities
pub struct CallContext {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    /// Shared outbound client for proxy-style handlers
    pub http: reqwest::Client,
    /// Branding, for envelope fields and `powered_by` strings
    pub settings: Arc<Settings>,
    query: HashMap<String, String>,
}

impl CallContext {
    pub fn new(state: &AppState, req: &Request) -> Self {
        let query = req
            .uri()
            .query()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();

        Self {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            headers: req.headers().clone(),
            http: state.http.clone(),
            settings: state.settings.clone(),
            query,
        }
    }

    /// Look up a query parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// JSON response carrying the gateway envelope
    pub fn json(&self, status: StatusCode, payload: Value) -> Response {
        let body = envelope(status, &self.settings.author, payload);
        (status, Json(body)).into_response()
    }

    /// Raw bytes response (image relays and the like)
    pub fn binary(&self, status: StatusCode, content_type: HeaderValue, bytes: bytes::Bytes) -> Response {
        (status, [(header::CONTENT_TYPE, content_type)], Body::from(bytes)).into_response()
    }
}

/// Merge a handler payload into the gateway response envelope.
///
/// Payload keys win over envelope keys, so a handler that sets its own
/// `status` field passes it through untouched.
pub fn envelope(status: StatusCode, creator: &str, payload: Value) -> Value {
    let mut map = serde_json::Map::new();
    map.insert("statusCode".to_string(), Value::from(status.as_u16()));
    map.insert("creator".to_string(), Value::from(creator.to_lowercase()));
    if let Value::Object(fields) = payload {
        for (key, value) in fields {
            map.insert(key, value);
        }
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_names() {
        let handlers = builtin();
        assert!(handlers.contains_key("hello"));
        assert!(handlers.contains_key("lyrics"));
        assert!(handlers.contains_key("anime-image"));
    }

    #[test]
    fn test_envelope_fields() {
        let body = envelope(StatusCode::OK, "SomeAuthor", json!({"message": "hi"}));
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["creator"], "someauthor");
        assert_eq!(body["message"], "hi");
        assert!(body.get("status").is_none());
    }

    #[test]
    fn test_envelope_payload_wins() {
        let body = envelope(
            StatusCode::OK,
            "a",
            json!({"status": true, "statusCode": 418}),
        );
        assert_eq!(body["status"], true);
        // The payload's own statusCode overrides the derived one
        assert_eq!(body["statusCode"], 418);
    }
}
