//! Remote entity service: the calls the create pipeline depends on.

use async_trait::async_trait;
use contracts::shared::crud::{CreateResponse, ErrorResponse, ListQuery, ListResponse};
use contracts::shared::record::Record;
use gloo_net::http::{Request, RequestBuilder, Response};
use thiserror::Error;

use crate::shared::api_utils::api_url;

/// Structured failure of a remote call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("not authorized")]
    Unauthorized,
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Unauthorized | Self::Decode(_) => false,
        }
    }
}

/// `create`, `list` and `get` over an entity collection
#[async_trait(?Send)]
pub trait EntityService {
    async fn create(&self, collection: &str, record: &Record) -> Result<CreateResponse, ApiError>;

    async fn list(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> Result<ListResponse<serde_json::Value>, ApiError>;

    /// One row by id
    async fn get(&self, collection: &str, id: &str) -> Result<serde_json::Value, ApiError>;
}

/// `EntityService` over the backend REST API
#[derive(Clone, Debug, Default)]
pub struct HttpEntityService {
    access_token: Option<String>,
}

impl HttpEntityService {
    pub fn new(access_token: Option<String>) -> Self {
        Self { access_token }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }
}

#[async_trait(?Send)]
impl EntityService for HttpEntityService {
    async fn create(&self, collection: &str, record: &Record) -> Result<CreateResponse, ApiError> {
        let url = api_url(&format!("/api/{}", collection));

        let response = self
            .authorize(Request::post(&url))
            .json(record)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = ensure_success(response).await?;
        response
            .json::<CreateResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn list(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> Result<ListResponse<serde_json::Value>, ApiError> {
        let query_string =
            serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
        let url = api_url(&format!("/api/{}?{}", collection, query_string));

        let response = self
            .authorize(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = ensure_success(response).await?;
        response
            .json::<ListResponse<serde_json::Value>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<serde_json::Value, ApiError> {
        let url = api_url(&format!("/api/{}/{}", collection, id));

        let response = self
            .authorize(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = ensure_success(response).await?;
        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Map non-2xx responses to `ApiError`, preferring the server's `{message}` body
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    if status == 401 || status == 403 {
        return Err(ApiError::Unauthorized);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => response.status_text(),
    };
    Err(ApiError::Http { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ApiError::Network("offline".into()).is_retryable());
        assert!(ApiError::Http {
            status: 503,
            message: "busy".into()
        }
        .is_retryable());
        assert!(!ApiError::Http {
            status: 422,
            message: "bad".into()
        }
        .is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let error = ApiError::Http {
            status: 409,
            message: "store already exists".into(),
        };
        assert_eq!(error.to_string(), "request failed (409): store already exists");
    }

    #[test]
    fn test_list_query_string() {
        let query = ListQuery::page(1, 20).with_filter("acme");
        assert_eq!(
            serde_qs::to_string(&query).unwrap(),
            "page=1&page_size=20&filter=acme"
        );
    }
}
