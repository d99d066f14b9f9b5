//! REST row and storage client for the hosted backend.

use async_trait::async_trait;
use mockall::automock;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::dependency::DependencyTag;
use crate::error::DataError;
use crate::query::RowQuery;
use crate::timeout::TimeoutConfig;

/// Row and file operations on the hosted backend.
///
/// Rows travel as untyped JSON; [`crate::records`] turns them into domain
/// types at the edge.
#[automock]
#[async_trait]
pub trait RowApi: Send + Sync {
    /// Read rows from a table.
    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Value>, DataError>;

    /// Insert one row (object) or many (array) and return what was written.
    async fn insert(&self, table: &str, rows: Value) -> Result<Vec<Value>, DataError>;

    /// Patch the rows matching `query` and return them.
    async fn update(
        &self,
        table: &str,
        query: &RowQuery,
        patch: Value,
    ) -> Result<Vec<Value>, DataError>;

    /// Delete the rows matching `query`.
    async fn delete(&self, table: &str, query: &RowQuery) -> Result<(), DataError>;

    /// Upload a file and return its public URL.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, DataError>;
}

/// Read rows and decode each into `T`.
pub async fn select_as<T: DeserializeOwned>(
    api: &dyn RowApi,
    table: &str,
    query: &RowQuery,
) -> Result<Vec<T>, DataError> {
    api.select(table, query)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(DataError::from))
        .collect()
}

/// Connection settings for [`RestClient`].
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// Public anonymous API key.
    pub anon_key: String,
    pub timeouts: TimeoutConfig,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            timeouts: DependencyTag::Rows.default_timeouts(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }
}

/// HTTP implementation of [`RowApi`].
///
/// Failed requests are returned to the caller, never retried.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: BackendConfig) -> Result<Self, DataError> {
        if config.url.trim().is_empty() {
            return Err(DataError::Request("backend url is not configured".to_string()));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key)
            .map_err(|_| DataError::Request("backend key is not a valid header".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|_| DataError::Request("backend key is not a valid header".to_string()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = config
            .timeouts
            .apply(Client::builder().default_headers(headers))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn rows_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Public URL of an object in a public bucket.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http.request(method, self.rows_url(table))
    }

    async fn send(&self, resource: &str, request: RequestBuilder) -> Result<Response, DataError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            tracing::debug!(resource, status, "Backend request failed");
            return Err(DataError::Http {
                status,
                resource: resource.to_string(),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl RowApi for RestClient {
    async fn select(&self, table: &str, query: &RowQuery) -> Result<Vec<Value>, DataError> {
        tracing::debug!(table, dependency = %DependencyTag::Rows, "select");
        let request = self.request(Method::GET, table).query(&query.to_pairs());
        Ok(self.send(table, request).await?.json().await?)
    }

    async fn insert(&self, table: &str, rows: Value) -> Result<Vec<Value>, DataError> {
        tracing::debug!(table, dependency = %DependencyTag::Rows, "insert");
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&rows);
        Ok(self.send(table, request).await?.json().await?)
    }

    async fn update(
        &self,
        table: &str,
        query: &RowQuery,
        patch: Value,
    ) -> Result<Vec<Value>, DataError> {
        if !query.has_filters() {
            return Err(DataError::Request(format!(
                "refusing unfiltered update on {}",
                table
            )));
        }
        tracing::debug!(table, dependency = %DependencyTag::Rows, "update");
        let request = self
            .request(Method::PATCH, table)
            .query(&query.filter_pairs())
            .header("Prefer", "return=representation")
            .json(&patch);
        Ok(self.send(table, request).await?.json().await?)
    }

    async fn delete(&self, table: &str, query: &RowQuery) -> Result<(), DataError> {
        if !query.has_filters() {
            return Err(DataError::Request(format!(
                "refusing unfiltered delete on {}",
                table
            )));
        }
        tracing::debug!(table, dependency = %DependencyTag::Rows, "delete");
        let request = self
            .request(Method::DELETE, table)
            .query(&query.filter_pairs());
        self.send(table, request).await?;
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, DataError> {
        tracing::debug!(bucket, path, size = bytes.len(), dependency = %DependencyTag::Storage, "upload");
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        let request = self
            .http
            .post(url)
            .timeout(DependencyTag::Storage.default_timeout())
            .header(CONTENT_TYPE, content_type)
            .body(bytes);
        self.send(bucket, request).await?;
        Ok(self.public_url(bucket, path))
    }
}
