use super::{ApiHandler, CallContext};
use crate::error::GatewayResult;
use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;

/// Greeting endpoint, the minimal demonstration of the handler contract
pub struct Hello;

#[async_trait]
impl ApiHandler for Hello {
    async fn handle(&self, cx: CallContext) -> GatewayResult<Response> {
        let greeting = match cx.param("name") {
            Some(name) if !name.is_empty() => format!("Hello, {name}!"),
            _ => "Hello, World!".to_string(),
        };

        Ok(cx.json(
            StatusCode::OK,
            json!({
                "message": greeting,
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "powered_by": cx.settings.name,
            }),
        ))
    }
}
