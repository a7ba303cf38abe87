//! HTTP client for the currency endpoints.

use std::future::Future;

use api_types::{
    currency::{CurrencyUpdate, CurrencyView},
    error::ErrorResponse,
};
use reqwest::{StatusCode, Url};
use thiserror::Error;
use uuid::Uuid;

use crate::error::{AppError, Result};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server answered {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl ClientError {
    /// The `error` field of the response body, when the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Endpoint(_) => None,
        }
    }
}

/// The currency operations the edit dialog depends on.
pub trait CurrencyApi {
    fn current_currency(
        &self,
    ) -> impl Future<Output = std::result::Result<Option<CurrencyView>, ClientError>> + Send;

    fn update_currency(
        &self,
        id: Uuid,
        body: &CurrencyUpdate,
    ) -> impl Future<Output = std::result::Result<CurrencyView, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        // `Url::join` drops the last path segment unless it ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Endpoint(err.to_string()))
    }

    async fn error_from(res: reqwest::Response) -> ClientError {
        let status = res.status();
        let message = res.json::<ErrorResponse>().await.ok().map(|err| err.error);
        ClientError::Status { status, message }
    }
}

impl CurrencyApi for Client {
    async fn current_currency(&self) -> std::result::Result<Option<CurrencyView>, ClientError> {
        let res = self.http.get(self.endpoint("currency")?).send().await?;

        if res.status().is_success() {
            return Ok(res.json::<Option<CurrencyView>>().await?);
        }
        Err(Self::error_from(res).await)
    }

    async fn update_currency(
        &self,
        id: Uuid,
        body: &CurrencyUpdate,
    ) -> std::result::Result<CurrencyView, ClientError> {
        let res = self
            .http
            .put(self.endpoint(&format!("currency/{id}"))?)
            .json(body)
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(res.json::<CurrencyView>().await?);
        }
        Err(Self::error_from(res).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_keeps_its_path() {
        let client = Client::new("http://localhost:3000/api").unwrap();
        assert_eq!(
            client.endpoint("currency").unwrap().as_str(),
            "http://localhost:3000/api/currency"
        );

        let client = Client::new("http://localhost:3000").unwrap();
        assert_eq!(
            client.endpoint("currency").unwrap().as_str(),
            "http://localhost:3000/currency"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(Client::new("not a url"), Err(AppError::BaseUrl(_))));
    }

    #[test]
    fn server_message_only_for_status_errors() {
        let err = ClientError::Status {
            status: StatusCode::NOT_FOUND,
            message: Some("currency not found".to_string()),
        };
        assert_eq!(err.server_message(), Some("currency not found"));
        assert_eq!(ClientError::Endpoint("x".to_string()).server_message(), None);
    }
}
