#![allow(dead_code)]

use axum_test::TestServer;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use toolkit::config::ToolkitConfig;
use toolkit::{app_config, Toolkit, ToolkitAppConfig};

// A test server over the demo routes, with scratch upload and static
// directories that are removed when the environment is dropped.
pub struct TestEnvironment {
    pub server: TestServer,
    pub toolkit: Toolkit,
    upload_dir: PathBuf,
    static_dir: TempDir,
    _upload_root: TempDir,
}

impl TestEnvironment {
    pub fn build(config: Option<ToolkitConfig>) -> Self {
        let upload_root = tempfile::tempdir().unwrap();
        let static_dir = tempfile::tempdir().unwrap();

        // not created up front, the upload pipeline has to create it
        let upload_dir = upload_root.path().join("uploads").join("nested");

        let toolkit = Toolkit::new(config.unwrap_or_default());
        let app = app_config(ToolkitAppConfig {
            toolkit: toolkit.clone(),
            upload_dir: upload_dir.clone(),
            static_dir: static_dir.path().to_path_buf(),
        });

        TestEnvironment {
            server: TestServer::new(app).unwrap(),
            toolkit,
            upload_dir,
            static_dir,
            _upload_root: upload_root,
        }
    }

    pub fn with_allowed_types(types: &[&str]) -> Self {
        Self::build(Some(ToolkitConfig {
            allowed_file_types: types.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }))
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn static_dir(&self) -> &Path {
        self.static_dir.path()
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.upload_dir) else {
            return Vec::new();
        };
        let mut names = entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}
