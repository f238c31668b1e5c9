use crate::util::env::{parse_strings_from_var, parse_var};

/// Default ceiling on a whole multipart upload body (1 GiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 1024 * 1024 * 1024;
/// Default ceiling on a JSON request body (1 MiB).
pub const DEFAULT_MAX_JSON_BYTES: usize = 1024 * 1024;

/// Settings shared by every [`Toolkit`](crate::Toolkit) operation.
///
/// A zero limit means "use the default". Limits are resolved once, when the
/// config is handed to [`Toolkit::new`](crate::Toolkit::new).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolkitConfig {
    /// MIME types accepted by the upload pipeline, compared case-insensitively
    /// against the sniffed type. Empty allows every type.
    pub allowed_file_types: Vec<String>,
    /// Maximum size of a whole multipart body in bytes.
    pub max_upload_bytes: u64,
    /// Maximum size of a JSON request body in bytes.
    pub max_json_bytes: usize,
    /// Whether JSON keys without a matching field are tolerated.
    pub allow_unknown_json_fields: bool,
}

impl ToolkitConfig {
    /// Reads the config from the environment (and `.env`, if loaded).
    ///
    /// Missing or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        ToolkitConfig {
            allowed_file_types: parse_strings_from_var("TOOLKIT_ALLOWED_FILE_TYPES")
                .unwrap_or_default(),
            max_upload_bytes: parse_var("TOOLKIT_MAX_UPLOAD_BYTES").unwrap_or(0),
            max_json_bytes: parse_var("TOOLKIT_MAX_JSON_BYTES").unwrap_or(0),
            allow_unknown_json_fields: parse_var("TOOLKIT_ALLOW_UNKNOWN_JSON_FIELDS")
                .unwrap_or(false),
        }
    }

    /// Replaces zero limits with their defaults.
    pub fn resolved(mut self) -> Self {
        if self.max_upload_bytes == 0 {
            self.max_upload_bytes = DEFAULT_MAX_UPLOAD_BYTES;
        }
        if self.max_json_bytes == 0 {
            self.max_json_bytes = DEFAULT_MAX_JSON_BYTES;
        }
        self
    }

    pub fn is_allowed_type(&self, content_type: &str) -> bool {
        self.allowed_file_types.is_empty()
            || self
                .allowed_file_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    }
}
