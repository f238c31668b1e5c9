use crate::util::json::JsonError;
use crate::Toolkit;
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Request};
use serde::de::DeserializeOwned;

/// A JSON body decoded with [`Toolkit::read_json`], using the toolkit from the
/// router state. Rejections render as the JSON error envelope.
pub struct StrictJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Toolkit: FromRef<S>,
{
    type Rejection = JsonError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let toolkit = Toolkit::from_ref(state);
        toolkit.read_json(req.into_body()).await.map(StrictJson)
    }
}

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(crate::routes::ApiError))]
pub struct Path<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(crate::routes::ApiError))]
pub struct Query<T>(pub T);
