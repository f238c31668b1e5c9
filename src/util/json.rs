use crate::models::response::JsonResponse;
use crate::util::exceeded_body_limit;
use crate::Toolkit;
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("request body cannot be empty")]
    Empty,
    #[error("request body contains badly formed JSON: at character {offset}")]
    Syntax { offset: usize },
    #[error("request body contains badly formed JSON at some point within")]
    Truncated,
    #[error("request body contains incorrect JSON type for field \"{0}\"")]
    IncorrectFieldType(String),
    #[error("request body contains incorrect JSON type: at character {offset}")]
    IncorrectType { offset: usize },
    #[error("request body contains unknown key \"{0}\"")]
    UnknownField(String),
    #[error("maximum allowed request body size is {limit} bytes")]
    TooLarge { limit: usize },
    #[error("request body must only contain one JSON value")]
    MultipleValues,
    #[error("Error while reading request body: {0}")]
    Body(#[source] axum::Error),
    #[error("error unmarshalling JSON request body: {0}")]
    Other(String),
    #[error("Error while serializing JSON response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl JsonError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            JsonError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            JsonError::Encode(..) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), &self)
    }
}

impl Toolkit {
    /// Reads at most `max_json_bytes` of `body` and decodes a single JSON
    /// value from it.
    pub async fn read_json<T: DeserializeOwned>(&self, body: Body) -> Result<T, JsonError> {
        let limit = self.config().max_json_bytes;

        let bytes = to_bytes(body, limit).await.map_err(|err| {
            if exceeded_body_limit(&err) {
                JsonError::TooLarge { limit }
            } else {
                JsonError::Body(err)
            }
        })?;

        self.decode_json(&bytes)
    }

    /// Decodes exactly one JSON value from `bytes`.
    ///
    /// Unknown keys are rejected unless `allow_unknown_json_fields` is set,
    /// and anything other than whitespace after the value is an error.
    pub fn decode_json<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, JsonError> {
        let limit = self.config().max_json_bytes;
        if bytes.len() > limit {
            return Err(JsonError::TooLarge { limit });
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(JsonError::Empty);
        }

        let mut deserializer = serde_json::Deserializer::from_slice(bytes);

        let mut unknown = None;
        let mut track = |path: serde_ignored::Path<'_>| {
            if unknown.is_none() {
                unknown = Some(path.to_string());
            }
        };

        let result: Result<T, _> = serde_path_to_error::deserialize(
            serde_ignored::Deserializer::new(&mut deserializer, &mut track),
        );

        // an unknown key seen before a failure is the first error in the body
        if !self.config().allow_unknown_json_fields {
            if let Some(field) = unknown {
                return Err(JsonError::UnknownField(field));
            }
        }

        let value = result.map_err(|err| classify(bytes, err))?;

        deserializer.end().map_err(|_| JsonError::MultipleValues)?;

        Ok(value)
    }

    /// Builds a JSON response. Caller headers are applied first, so they can
    /// not override the `Content-Type`.
    pub fn write_json<T: Serialize>(
        &self,
        status: StatusCode,
        data: &T,
        headers: Option<HeaderMap>,
    ) -> Result<Response, JsonError> {
        json_response(status, data, headers)
    }

    /// Wraps `err` in an error envelope. `status` defaults to 400.
    pub fn error_json(
        &self,
        err: impl Display,
        status: Option<StatusCode>,
    ) -> Result<Response, JsonError> {
        let payload = JsonResponse::<()>::error(err.to_string());
        self.write_json(status.unwrap_or(StatusCode::BAD_REQUEST), &payload, None)
    }
}

pub(crate) fn json_response<T: Serialize>(
    status: StatusCode,
    data: &T,
    headers: Option<HeaderMap>,
) -> Result<Response, JsonError> {
    let body = serde_json::to_vec(data).map_err(JsonError::Encode)?;

    let mut response = Response::new(Body::from(body));
    if let Some(headers) = headers {
        response.headers_mut().extend(headers);
    }
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    *response.status_mut() = status;

    Ok(response)
}

pub(crate) fn error_response(status: StatusCode, err: &dyn Display) -> Response {
    let payload = JsonResponse::<()>::error(err.to_string());
    match json_response(status, &payload, None) {
        Ok(response) => response,
        Err(_) => status.into_response(),
    }
}

fn classify(bytes: &[u8], err: serde_path_to_error::Error<serde_json::Error>) -> JsonError {
    let field = err.path().to_string();
    let err = err.into_inner();
    let offset = byte_offset(bytes, err.line(), err.column());

    match err.classify() {
        Category::Syntax => JsonError::Syntax { offset },
        Category::Eof => JsonError::Truncated,
        Category::Data if field != "." => JsonError::IncorrectFieldType(field),
        // failures at the root of an object are about its field set, e.g. a
        // missing field, not about the type of a value
        Category::Data if starts_with_object(bytes) => JsonError::Other(err.to_string()),
        Category::Data => JsonError::IncorrectType { offset },
        Category::Io => JsonError::Other(err.to_string()),
    }
}

fn starts_with_object(bytes: &[u8]) -> bool {
    bytes.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{')
}

/// Converts serde_json's 1-based line and column into a byte offset.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = bytes
        .split_inclusive(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(<[u8]>::len)
        .sum();

    (line_start + column).min(bytes.len())
}
