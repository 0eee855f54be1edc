use super::{ApiHandler, CallContext};
use crate::error::GatewayResult;
use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{Value, json};

const LYRICS_API: &str = "https://api.lyrics.ovh/v1";

/// Lyrics lookup, proxied through lyrics.ovh
pub struct Lyrics;

#[async_trait]
impl ApiHandler for Lyrics {
    async fn handle(&self, cx: CallContext) -> GatewayResult<Response> {
        let (artist, song) = match (cx.param("artist"), cx.param("song")) {
            (Some(artist), Some(song)) if !artist.is_empty() && !song.is_empty() => {
                (artist.to_string(), song.to_string())
            }
            _ => {
                return Ok(cx.json(
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Missing required parameters: artist and song",
                        "timestamp": chrono::Utc::now().to_rfc3339(),
                        "powered_by": cx.settings.name,
                    }),
                ));
            }
        };

        let url = format!(
            "{LYRICS_API}/{}/{}",
            urlencoding::encode(&artist),
            urlencoding::encode(&song)
        );
        // Upstream transport failures bubble to the central 500 path
        let data: Value = cx.http.get(&url).send().await?.json().await?;

        match data.get("lyrics").and_then(Value::as_str) {
            Some(lyrics) => Ok(cx.json(
                StatusCode::OK,
                json!({
                    "lyrics": lyrics,
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "powered_by": cx.settings.name,
                }),
            )),
            None => Ok(cx.json(
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Lyrics not found",
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "powered_by": cx.settings.name,
                }),
            )),
        }
    }
}
