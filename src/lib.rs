use std::path::PathBuf;

use axum::extract::FromRef;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ToolkitConfig;
use crate::util::env::parse_var;
use crate::util::slug::SlugError;

pub mod config;
pub mod file_hosting;
pub mod models;
pub mod routes;
pub mod util;

pub use crate::file_hosting::{RenamePolicy, UploadError, UploadFailure};
pub use crate::models::files::UploadedFile;
pub use crate::models::response::JsonResponse;
pub use crate::util::json::JsonError;
pub use crate::util::remote::PushError;

/// Helpers for common web backend chores, sharing one resolved config.
///
/// Cloning is cheap enough to do per request, which is what the
/// [`StrictJson`](crate::util::extract::StrictJson) extractor does.
#[derive(Clone, Debug)]
pub struct Toolkit {
    config: ToolkitConfig,
}

impl Toolkit {
    /// Creates a toolkit, substituting defaults for any zero limit.
    pub fn new(config: ToolkitConfig) -> Self {
        Toolkit {
            config: config.resolved(),
        }
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Returns `n` random characters. See [`util::random::random_string`].
    pub fn random_string(&self, n: usize) -> String {
        util::random::random_string(n)
    }

    pub fn slugify(&self, s: &str) -> Result<String, SlugError> {
        util::slug::slugify(s)
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Toolkit::new(ToolkitConfig::default())
    }
}

/// State shared by the demo routes.
#[derive(Clone, FromRef)]
pub struct ToolkitAppConfig {
    pub toolkit: Toolkit,
    #[from_ref(skip)]
    pub upload_dir: PathBuf,
    #[from_ref(skip)]
    pub static_dir: PathBuf,
}

impl ToolkitAppConfig {
    pub fn from_env() -> Self {
        let config = ToolkitConfig::from_env();
        info!(
            "Toolkit config: {} allowed file type(s), unknown JSON fields {}",
            config.allowed_file_types.len(),
            if config.allow_unknown_json_fields {
                "allowed"
            } else {
                "rejected"
            }
        );

        ToolkitAppConfig {
            toolkit: Toolkit::new(config),
            upload_dir: parse_var("UPLOAD_DIR").unwrap_or_else(|| PathBuf::from("./uploads")),
            static_dir: parse_var("STATIC_DIR").unwrap_or_else(|| PathBuf::from("./static")),
        }
    }
}

pub fn app_config(app_config: ToolkitAppConfig) -> Router {
    Router::new()
        .merge(routes::config())
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_config)
}

/// Returns true if any variable is missing or not of the expected type.
pub fn check_env_vars() -> bool {
    let mut failed = false;

    fn check_var<T: std::str::FromStr>(var: &'static str) -> bool {
        let check = parse_var::<T>(var).is_none();
        if check {
            warn!(
                "Variable `{}` missing in dotenv or not of type `{}`",
                var,
                std::any::type_name::<T>()
            );
        }
        check
    }

    failed |= check_var::<String>("BIND_ADDR");
    failed |= check_var::<PathBuf>("UPLOAD_DIR");
    failed |= check_var::<PathBuf>("STATIC_DIR");

    for var in ["TOOLKIT_MAX_UPLOAD_BYTES", "TOOLKIT_MAX_JSON_BYTES"] {
        if dotenvy::var(var).is_ok() {
            failed |= check_var::<u64>(var);
        }
    }
    if dotenvy::var("TOOLKIT_ALLOW_UNKNOWN_JSON_FIELDS").is_ok() {
        failed |= check_var::<bool>("TOOLKIT_ALLOW_UNKNOWN_JSON_FIELDS");
    }
    if dotenvy::var("TOOLKIT_ALLOWED_FILE_TYPES").is_ok()
        && util::env::parse_strings_from_var("TOOLKIT_ALLOWED_FILE_TYPES").is_none()
    {
        warn!("Variable `TOOLKIT_ALLOWED_FILE_TYPES` must be a JSON array of strings");
        failed = true;
    }

    failed
}
