use super::{client_file_name, sniff, RenamePolicy, UploadError, UploadFailure};
use crate::models::files::UploadedFile;
use crate::Toolkit;
use axum::body::Body;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;
use multer::{Constraints, SizeLimit};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct FilePart {
    file_name: String,
    data: Bytes,
}

impl Toolkit {
    /// Stores every file part of a multipart `request` in `upload_dir`.
    ///
    /// The whole body is limited to `max_upload_bytes` and is read completely
    /// before any file is written, so parts are buffered in memory up to that
    /// limit. Each part is then sniffed and checked against
    /// `allowed_file_types`, and the first rejected part ends the upload.
    /// Files already written are not removed; they are returned in
    /// [`UploadFailure::uploaded`].
    pub async fn upload_files(
        &self,
        request: Request,
        upload_dir: impl AsRef<Path>,
        rename: RenamePolicy,
    ) -> Result<Vec<UploadedFile>, UploadFailure> {
        let upload_dir = upload_dir.as_ref();
        let mut uploaded = Vec::new();

        match self
            .upload_into(request, upload_dir, rename, &mut uploaded)
            .await
        {
            Ok(()) => {
                info!(
                    "Stored {} uploaded file(s) in {}",
                    uploaded.len(),
                    upload_dir.display()
                );
                Ok(uploaded)
            }
            Err(error) => {
                warn!(
                    "Upload to {} failed after {} file(s): {}",
                    upload_dir.display(),
                    uploaded.len(),
                    error
                );
                Err(UploadFailure::new(error, uploaded))
            }
        }
    }

    /// Runs [`upload_files`](Self::upload_files) and returns the first stored
    /// file. Every file part in the request is still stored.
    pub async fn upload_one_file(
        &self,
        request: Request,
        upload_dir: impl AsRef<Path>,
        rename: RenamePolicy,
    ) -> Result<UploadedFile, UploadFailure> {
        self.upload_files(request, upload_dir, rename)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| UploadFailure::new(UploadError::NoFiles, Vec::new()))
    }

    async fn upload_into(
        &self,
        request: Request,
        upload_dir: &Path,
        rename: RenamePolicy,
        uploaded: &mut Vec<UploadedFile>,
    ) -> Result<(), UploadError> {
        self.create_dir_if_not_exist(upload_dir).await?;

        let boundary = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| multer::parse_boundary(value).ok())
            .ok_or(UploadError::NotMultipart)?;

        let limit = self.config().max_upload_bytes;
        for part in read_file_parts(request.into_body(), boundary, limit).await? {
            let file = self.store_part(upload_dir, part, rename).await?;
            uploaded.push(file);
        }

        Ok(())
    }

    async fn store_part(
        &self,
        upload_dir: &Path,
        part: FilePart,
        rename: RenamePolicy,
    ) -> Result<UploadedFile, UploadError> {
        let content_type = sniff::detect_content_type(&part.data);
        if !self.config().is_allowed_type(content_type) {
            warn!(
                "Rejected `{}`: content type {} is not allowed",
                part.file_name, content_type
            );
            return Err(UploadError::TypeNotPermitted);
        }

        let stored_name = rename.apply(&part.file_name)?;
        if stored_name.is_empty() {
            return Err(UploadError::InvalidFileName(part.file_name));
        }

        let mut file = File::create(upload_dir.join(&stored_name)).await?;
        file.write_all(&part.data).await?;
        file.flush().await?;

        debug!(
            "Stored `{}` as `{}` ({} bytes, {})",
            part.file_name,
            stored_name,
            part.data.len(),
            content_type
        );

        Ok(UploadedFile {
            stored_name,
            original_name: part.file_name,
            size: part.data.len() as u64,
        })
    }
}

/// Collects the file parts of a multipart body, grouped by field name in the
/// order each field first appears. Parts without a file name are skipped.
///
/// The body is streamed through multer, which fails once more than `limit`
/// bytes arrive. Every part is held in memory until the whole body is read,
/// so peak memory grows with the upload up to about `limit`.
async fn read_file_parts(
    body: Body,
    boundary: String,
    limit: u64,
) -> Result<Vec<FilePart>, UploadError> {
    let constraints = Constraints::new().size_limit(SizeLimit::new().whole_stream(limit));
    let mut multipart =
        multer::Multipart::with_constraints(body.into_data_stream(), boundary, constraints);

    let mut fields: Vec<(String, Vec<FilePart>)> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(raw_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let field_name = field.name().unwrap_or_default().to_string();

        let part = FilePart {
            file_name: client_file_name(&raw_name)?,
            data: field.bytes().await?,
        };

        match fields.iter_mut().find(|(name, _)| *name == field_name) {
            Some((_, parts)) => parts.push(part),
            None => fields.push((field_name, vec![part])),
        }
    }

    Ok(fields.into_iter().flat_map(|(_, parts)| parts).collect())
}
