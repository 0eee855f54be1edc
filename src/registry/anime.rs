use super::{ApiHandler, CallContext};
use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use rand::Rng;

/// Published list of image links; one is picked at random per request
const LINKS_URL: &str =
    "https://raw.githubusercontent.com/rynxzyy/loli-r-img/refs/heads/main/links.json";

/// Random anime image relay: fetch the link list, pick one, stream the bytes
pub struct AnimeImage;

#[async_trait]
impl ApiHandler for AnimeImage {
    async fn handle(&self, cx: CallContext) -> GatewayResult<Response> {
        let links: Vec<String> = cx.http.get(LINKS_URL).send().await?.json().await?;
        if links.is_empty() {
            return Err(GatewayError::Internal("upstream link list is empty".into()));
        }

        let pick = &links[rand::thread_rng().gen_range(0..links.len())];
        let upstream = cx.http.get(pick).send().await?;
        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("image/png"));
        let bytes = upstream.bytes().await?;

        Ok(cx.binary(StatusCode::OK, content_type, bytes))
    }
}
