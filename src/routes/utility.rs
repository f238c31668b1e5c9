use super::ApiError;
use crate::models::response::JsonResponse;
use crate::util::extract::{Path, StrictJson};
use crate::ToolkitAppConfig;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};

const MAX_RANDOM_LENGTH: usize = 4096;

#[derive(Serialize, Deserialize)]
pub struct EchoMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

pub async fn echo_json(
    State(config): State<ToolkitAppConfig>,
    StrictJson(body): StrictJson<EchoMessage>,
) -> Result<Response, ApiError> {
    let payload = JsonResponse::ok("received", body);
    Ok(config.toolkit.write_json(StatusCode::ACCEPTED, &payload, None)?)
}

#[derive(Deserialize)]
pub struct SlugRequest {
    pub text: String,
}

pub async fn slug(
    State(config): State<ToolkitAppConfig>,
    StrictJson(body): StrictJson<SlugRequest>,
) -> Result<Response, ApiError> {
    let slug = config.toolkit.slugify(&body.text)?;
    Ok(config
        .toolkit
        .write_json(StatusCode::OK, &JsonResponse::ok("slug created", slug), None)?)
}

pub async fn random_string(
    State(config): State<ToolkitAppConfig>,
    Path(length): Path<usize>,
) -> Result<Response, ApiError> {
    if length > MAX_RANDOM_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "length must be at most {}",
            MAX_RANDOM_LENGTH
        )));
    }

    let value = config.toolkit.random_string(length);
    Ok(config
        .toolkit
        .write_json(StatusCode::OK, &JsonResponse::ok("random string", value), None)?)
}
