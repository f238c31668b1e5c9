use super::ApiError;
use crate::file_hosting::RenamePolicy;
use crate::models::response::JsonResponse;
use crate::util::extract::{Path, Query};
use crate::ToolkitAppConfig;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub rename: String,
}

pub async fn upload_files(
    State(config): State<ToolkitAppConfig>,
    Query(query): Query<UploadQuery>,
    request: Request,
) -> Result<Response, ApiError> {
    let files = config
        .toolkit
        .upload_files(
            request,
            &config.upload_dir,
            RenamePolicy::from_name(&query.rename),
        )
        .await?;

    let payload = JsonResponse::ok(format!("{} file(s) uploaded", files.len()), files);
    Ok(config.toolkit.write_json(StatusCode::OK, &payload, None)?)
}

pub async fn upload_one_file(
    State(config): State<ToolkitAppConfig>,
    Query(query): Query<UploadQuery>,
    request: Request,
) -> Result<Response, ApiError> {
    let file = config
        .toolkit
        .upload_one_file(
            request,
            &config.upload_dir,
            RenamePolicy::from_name(&query.rename),
        )
        .await?;

    let payload = JsonResponse::ok("file uploaded", file);
    Ok(config.toolkit.write_json(StatusCode::OK, &payload, None)?)
}

#[derive(Deserialize)]
pub struct DownloadQuery {
    pub name: Option<String>,
}

pub async fn download_file(
    State(config): State<ToolkitAppConfig>,
    Path(file): Path<String>,
    Query(query): Query<DownloadQuery>,
    request: Request,
) -> Result<Response, ApiError> {
    if file.contains(['/', '\\']) || file == "." || file == ".." {
        return Err(ApiError::InvalidInput(format!(
            "`{}` is not a valid file name",
            file
        )));
    }

    let display_name = query.name.unwrap_or_else(|| file.clone());

    Ok(config
        .toolkit
        .download_static_file(request, &config.static_dir, &file, &display_name)
        .await)
}
