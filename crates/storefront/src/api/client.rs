//! `reqwest` implementation of [`CartApi`].

use std::sync::Arc;

use async_trait::async_trait;
use cartwire_core::{
    AddToCartRequest, CartSummary, QuantityEcho, RemoveCartItemRequest, UpdateCartItemRequest,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{ADD_PATH, ApiError, CartApi, REMOVE_PATH, Result, SUMMARY_PATH, UPDATE_PATH};
use crate::config::ClientConfig;

/// HTTP client for the cart API.
///
/// Cheaply cloneable; clones share one connection pool.
#[derive(Clone)]
pub struct HttpCartApi {
    inner: Arc<HttpCartApiInner>,
}

struct HttpCartApiInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCartApi {
    /// Create a new cart API client.
    ///
    /// # Errors
    ///
    /// Returns error if the session cookie is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(cookie) = &config.session_cookie {
            let mut value = HeaderValue::from_str(cookie.expose_secret())
                .map_err(|e| ApiError::Setup(format!("Invalid session cookie: {e}")))?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(HttpCartApiInner {
                client,
                base_url: with_trailing_slash(config.base_url.clone()),
            }),
        })
    }

    /// The origin endpoint paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// POST `payload` as JSON to `path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] if no response arrives
    /// - [`ApiError::HttpStatus`] for any non-2xx status
    /// - [`ApiError::Decode`] if the body is not the expected JSON
    #[instrument(skip(self, payload))]
    pub async fn post<P, R>(&self, path: &str, payload: &P) -> Result<R>
    where
        P: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");

        let response = self
            .inner
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(ApiError::Network)?;

        decode(response).await
    }

    /// GET `path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`HttpCartApi::post`].
    #[instrument(skip(self))]
    pub async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");

        let response = self
            .inner
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::Network)?;

        decode(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }
}

#[async_trait]
impl CartApi for HttpCartApi {
    async fn add_item(&self, request: AddToCartRequest) -> Result<serde_json::Value> {
        self.post(ADD_PATH, &request).await
    }

    async fn update_item(&self, request: UpdateCartItemRequest) -> Result<QuantityEcho> {
        self.post(UPDATE_PATH, &request).await
    }

    async fn remove_item(&self, request: RemoveCartItemRequest) -> Result<serde_json::Value> {
        self.post(REMOVE_PATH, &request).await
    }

    async fn summary(&self) -> Result<CartSummary> {
        self.get(SUMMARY_PATH).await
    }
}

/// Map a response to its decoded JSON body, failing on non-success status.
async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let status = response.status();
    if !status.is_success() {
        debug!(status = status.as_u16(), "non-success status, body discarded");
        return Err(ApiError::HttpStatus {
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(ApiError::Network)?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Base URLs are joined against, so a path prefix needs a trailing slash to
/// survive the join.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
