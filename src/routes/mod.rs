use crate::file_hosting::{UploadError, UploadFailure};
use crate::models::response::JsonResponse;
use crate::util::json::{error_response, json_response, JsonError};
use crate::util::slug::SlugError;
use crate::ToolkitAppConfig;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

mod files;
mod utility;

pub fn config() -> Router<ToolkitAppConfig> {
    Router::new()
        .route("/upload", post(files::upload_files))
        .route("/upload/one", post(files::upload_one_file))
        .route("/download/:file", get(files::download_file))
        .route("/json", post(utility::echo_json))
        .route("/slug", post(utility::slug))
        .route("/random/:length", get(utility::random_string))
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, &"the requested route does not exist")
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Upload(#[from] UploadFailure),
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error("Invalid Input: {0}")]
    InvalidInput(String),
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        ApiError::InvalidInput(err.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::InvalidInput(err.body_text())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Upload(failure) => match failure.error {
                UploadError::SizeExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                UploadError::TypeNotPermitted => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                UploadError::Random(..) | UploadError::Io(..) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                UploadError::NotMultipart
                | UploadError::InvalidFileName(..)
                | UploadError::NoFiles
                | UploadError::Multipart(..) => StatusCode::BAD_REQUEST,
            },
            ApiError::Json(err) => err.status_code(),
            ApiError::Slug(..) | ApiError::InvalidInput(..) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            // partial results are reported alongside the error
            ApiError::Upload(failure) if !failure.uploaded.is_empty() => {
                let payload = JsonResponse {
                    error: true,
                    message: failure.error.to_string(),
                    data: Some(failure.uploaded),
                };
                json_response(status, &payload, None).unwrap_or_else(|err| err.into_response())
            }
            err => error_response(status, &err),
        }
    }
}
