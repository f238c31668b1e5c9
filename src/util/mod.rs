use http_body_util::LengthLimitError;
use std::error::Error as _;

pub mod env;
pub mod extract;
pub mod json;
pub mod random;
pub mod remote;
pub mod slug;

/// Whether a body read failed because it hit its size limit.
pub(crate) fn exceeded_body_limit(err: &axum::Error) -> bool {
    err.source()
        .map_or(false, |source| source.is::<LengthLimitError>())
}
