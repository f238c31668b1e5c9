use crate::models::files::UploadedFile;
use crate::util::random::try_random_string;
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;
use thiserror::Error;

mod directory;
mod download;
pub mod sniff;
mod upload;

/// Length of the base name generated by [`RenamePolicy::RandomName`].
pub const RANDOM_NAME_LENGTH: usize = 32;

lazy_static! {
    static ref RE_NOT_FILE_SAFE: Regex = Regex::new(r"[^a-zA-Z0-9-]+").unwrap();
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("uploaded file exceeds allowed maximum file size of {limit} bytes")]
    SizeExceeded { limit: u64 },
    #[error("the uploaded file type is not permitted")]
    TypeNotPermitted,
    #[error("request is not a multipart form")]
    NotMultipart,
    #[error("invalid file name `{0}`")]
    InvalidFileName(String),
    #[error("no files found in the request")]
    NoFiles,
    #[error("Error while parsing multipart payload: {0}")]
    Multipart(#[source] multer::Error),
    #[error("Error while generating a random file name: {0}")]
    Random(#[from] rand::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<multer::Error> for UploadError {
    fn from(err: multer::Error) -> Self {
        match err {
            multer::Error::StreamSizeExceeded { limit } => UploadError::SizeExceeded { limit },
            err => UploadError::Multipart(err),
        }
    }
}

/// An upload that stopped part way through.
///
/// Files stored before the failure are left on disk and listed in `uploaded`.
#[derive(Error, Debug)]
#[error("{}", .error)]
pub struct UploadFailure {
    #[source]
    pub error: UploadError,
    pub uploaded: Vec<UploadedFile>,
}

impl UploadFailure {
    pub fn new(error: impl Into<UploadError>, uploaded: Vec<UploadedFile>) -> Self {
        Self {
            error: error.into(),
            uploaded,
        }
    }
}

/// How an uploaded file is named on disk. The extension is always kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenamePolicy {
    #[default]
    KeepOriginal,
    RandomName,
    /// Runs of characters outside `[A-Za-z0-9-]` become `_`, case is kept.
    NormalizeKeepCase,
    /// Like `NormalizeKeepCase`, after lowercasing.
    NormalizeLowercase,
}

impl RenamePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenamePolicy::KeepOriginal => "",
            RenamePolicy::RandomName => "randomString",
            RenamePolicy::NormalizeKeepCase => "noSpaces:retainCase",
            RenamePolicy::NormalizeLowercase => "noSpaces:allLowercase",
        }
    }

    /// Parses a policy name. Unknown names keep the original file name.
    pub fn from_name(name: &str) -> RenamePolicy {
        match name {
            "randomString" => RenamePolicy::RandomName,
            "noSpaces:retainCase" => RenamePolicy::NormalizeKeepCase,
            "noSpaces:allLowercase" => RenamePolicy::NormalizeLowercase,
            _ => RenamePolicy::KeepOriginal,
        }
    }

    /// Computes the stored name for `file_name`.
    pub fn apply(&self, file_name: &str) -> Result<String, UploadError> {
        let (name, ext) = split_extension(file_name);

        let name = match self {
            RenamePolicy::KeepOriginal => return Ok(file_name.to_string()),
            RenamePolicy::RandomName => try_random_string(RANDOM_NAME_LENGTH)?,
            RenamePolicy::NormalizeKeepCase => normalize(name),
            RenamePolicy::NormalizeLowercase => normalize(&name.to_lowercase()),
        };

        Ok(format!("{}{}", name, ext))
    }
}

impl FromStr for RenamePolicy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RenamePolicy::from_name(s))
    }
}

fn normalize(name: &str) -> String {
    RE_NOT_FILE_SAFE
        .replace_all(name, "_")
        .trim_matches('_')
        .to_string()
}

/// Splits `file_name` into base name and extension (from the last `.`).
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(index) => file_name.split_at(index),
        None => (file_name, ""),
    }
}

/// Strips any directory components a client put into a file name.
pub(crate) fn client_file_name(raw: &str) -> Result<String, UploadError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    match name {
        "" | "." | ".." => Err(UploadError::InvalidFileName(raw.to_string())),
        name => Ok(name.to_string()),
    }
}
