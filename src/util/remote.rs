use crate::Toolkit;
use axum::http::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PushError {
    #[error("Error while serializing JSON payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Error while sending request to remote service: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Toolkit {
    /// POSTs `data` as JSON to `uri` and returns the response with its status.
    ///
    /// Uses `client` if given, otherwise a default client without a timeout.
    /// The body of the returned response is not read here: the caller owns
    /// it, and dropping the response releases the connection.
    pub async fn push_json_to_remote<T: Serialize + ?Sized>(
        &self,
        uri: &str,
        data: &T,
        client: Option<&reqwest::Client>,
    ) -> Result<(reqwest::Response, StatusCode), PushError> {
        let body = serde_json::to_vec(data)?;

        let default_client;
        let client = match client {
            Some(client) => client,
            None => {
                default_client = reqwest::Client::new();
                &default_client
            }
        };

        let response = client
            .post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        debug!("Pushed JSON to {}: {}", uri, status);

        Ok((response, status))
    }
}
