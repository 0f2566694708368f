//! Content negotiation for the JSON API.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::Value;

use crate::error::AppError;

pub const JSON_MIME: &str = "application/json";

/// Rejects requests whose `Accept` header rules out `application/json`.
pub async fn accept_json(request: Request, next: Next) -> Result<Response, AppError> {
    if !accepts(request.headers(), JSON_MIME) {
        tracing::debug!("Rejecting request that does not accept {}", JSON_MIME);
        return Err(AppError::NotAcceptable(format!(
            "Request must accept {} data",
            JSON_MIME
        )));
    }

    Ok(next.run(request).await)
}

/// Whether `mime` satisfies the request's `Accept` header.
///
/// A missing header accepts anything. Ranges with `q=0` exclude the type.
pub fn accepts(headers: &HeaderMap, mime: &str) -> bool {
    let values: Vec<&str> = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.is_empty() {
        return true;
    }

    let (kind, subtype) = mime.split_once('/').unwrap_or((mime, "*"));

    values
        .iter()
        .flat_map(|v| v.split(','))
        .filter_map(MediaRange::parse)
        .filter(|range| range.covers(kind, subtype))
        .max_by_key(|range| range.specificity())
        .is_some_and(|range| range.quality > 0.0)
}

struct MediaRange<'a> {
    kind: &'a str,
    subtype: &'a str,
    quality: f32,
}

impl<'a> MediaRange<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.split(';').map(str::trim);
        let (kind, subtype) = parts.next()?.split_once('/')?;

        let quality = parts
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
            .and_then(|(_, q)| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        Some(Self {
            kind: kind.trim(),
            subtype: subtype.trim(),
            quality,
        })
    }

    fn covers(&self, kind: &str, subtype: &str) -> bool {
        (self.kind == "*" || self.kind.eq_ignore_ascii_case(kind))
            && (self.subtype == "*" || self.subtype.eq_ignore_ascii_case(subtype))
    }

    fn specificity(&self) -> u8 {
        u8::from(self.kind != "*") + u8::from(self.subtype != "*")
    }
}

/// A JSON request body, rejected with [`AppError`] rather than axum's plain-text
/// rejections.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Err(AppError::UnsupportedMediaType(
                format!("Request must contain {} data", JSON_MIME),
            )),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
