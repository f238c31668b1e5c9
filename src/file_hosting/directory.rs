use crate::Toolkit;
use std::io;
use std::path::Path;
use tokio::fs::DirBuilder;
use tracing::debug;

impl Toolkit {
    /// Creates `path` and any missing parents. An existing directory is left
    /// alone; an existing file at `path` is an error.
    pub async fn create_dir_if_not_exist(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();

        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("`{}` exists and is not a directory", path.display()),
            )),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("Creating directory {}", path.display());

                let mut builder = DirBuilder::new();
                builder.recursive(true);
                #[cfg(unix)]
                builder.mode(0o755);
                builder.create(path).await
            }
            Err(err) => Err(err),
        }
    }
}
