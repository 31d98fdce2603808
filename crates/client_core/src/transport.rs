//! REST access to the remote book collection.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{Book, BookId, BookPayload};
use tracing::debug;
use url::Url;

use crate::error::{ClientError, FetchError};

/// The remote collection resource, one method per endpoint.
#[async_trait]
pub trait BookApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Book>, ClientError>;
    async fn get(&self, id: &BookId) -> Result<Book, ClientError>;
    async fn create(&self, payload: &BookPayload) -> Result<Book, ClientError>;
    async fn update(&self, id: &BookId, payload: &BookPayload) -> Result<Book, ClientError>;
    async fn delete(&self, id: &BookId) -> Result<(), ClientError>;
}

pub struct HttpBookApi {
    http: Client,
    base: Url,
}

impl HttpBookApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let invalid = |reason: &str| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let base = Url::parse(base_url.trim()).map_err(|err| invalid(&err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("base url must start with http:// or https://"));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("base url cannot carry path segments"));
        }

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &str {
        self.collection_url_str()
    }

    fn collection_url_str(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    fn record_url(&self, id: &BookId) -> Result<String, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                url: self.base.to_string(),
                reason: "base url cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url.into())
    }

    async fn execute(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
        id: Option<&BookId>,
    ) -> Result<Response, ClientError> {
        debug!(method, url, "book api request");
        let res = request
            .send()
            .await
            .map_err(|err| FetchError::transport(method, url, &err))?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(ClientError::NotFound { id: id.clone() });
            }
        }
        if !status.is_success() {
            return Err(FetchError::status(method, url, status).into());
        }
        Ok(res)
    }

    async fn decode<T: DeserializeOwned>(
        method: &'static str,
        url: &str,
        res: Response,
    ) -> Result<T, ClientError> {
        res.json::<T>()
            .await
            .map_err(|err| FetchError::transport(method, url, &err).into())
    }
}

#[async_trait]
impl BookApi for HttpBookApi {
    async fn list(&self) -> Result<Vec<Book>, ClientError> {
        let url = self.collection_url_str();
        let res = self.execute("GET", url, self.http.get(url), None).await?;
        Self::decode("GET", url, res).await
    }

    async fn get(&self, id: &BookId) -> Result<Book, ClientError> {
        let url = self.record_url(id)?;
        let res = self
            .execute("GET", &url, self.http.get(&url), Some(id))
            .await?;
        Self::decode("GET", &url, res).await
    }

    async fn create(&self, payload: &BookPayload) -> Result<Book, ClientError> {
        let url = self.collection_url_str();
        let res = self
            .execute("POST", url, self.http.post(url).json(payload), None)
            .await?;
        Self::decode("POST", url, res).await
    }

    async fn update(&self, id: &BookId, payload: &BookPayload) -> Result<Book, ClientError> {
        let url = self.record_url(id)?;
        let res = self
            .execute("PUT", &url, self.http.put(&url).json(payload), Some(id))
            .await?;
        Self::decode("PUT", &url, res).await
    }

    async fn delete(&self, id: &BookId) -> Result<(), ClientError> {
        let url = self.record_url(id)?;
        // Any response body is ignored.
        self.execute("DELETE", &url, self.http.delete(&url), Some(id))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
