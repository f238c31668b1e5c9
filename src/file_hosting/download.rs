use crate::Toolkit;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, HeaderValue};
use axum::response::Response;
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::ServeFile;

impl Toolkit {
    /// Serves `base_dir/file_name` as an attachment named `display_name`.
    ///
    /// Range requests, conditional requests, content type and the 404 for a
    /// missing file are handled by [`ServeFile`].
    pub async fn download_static_file(
        &self,
        request: Request,
        base_dir: impl AsRef<Path>,
        file_name: &str,
        display_name: &str,
    ) -> Response {
        let path = base_dir.as_ref().join(file_name);

        let mut response = match ServeFile::new(path).oneshot(request).await {
            Ok(response) => response.map(Body::new),
            Err(err) => match err {},
        };

        if response.status().is_success() {
            response
                .headers_mut()
                .insert(header::CONTENT_DISPOSITION, content_disposition(display_name));
        }

        response
    }
}

fn content_disposition(display_name: &str) -> HeaderValue {
    let name = display_name
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect::<String>();

    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
