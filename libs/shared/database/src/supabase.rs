use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::error::StoreError;
use crate::query::Query;

const RETURN_REPRESENTATION: &str = "return=representation";

/// Handle to the PostgREST document store. Built once and shared through
/// `AppState`; the inner `reqwest::Client` pools connections.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_key: config.supabase_service_key.clone(),
        }
    }

    fn get_headers(&self, prefer: Option<&str>) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(&self.service_key)
            .map_err(|_| StoreError::Config("service key is not a valid header value".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.service_key))
            .map_err(|_| StoreError::Config("service key is not a valid header value".to_string()))?;

        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(prefer) = prefer {
            let value = HeaderValue::from_str(prefer)
                .map_err(|_| StoreError::Config(format!("invalid Prefer header: {}", prefer)))?;
            headers.insert("Prefer", value);
        }

        Ok(headers)
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        prefer: Option<&str>,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let headers = self.get_headers(prefer)?;

        let mut req = self.client.request(method, &url)
            .headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store error ({}): {}", status, error_text);
            return Err(StoreError::from_status(status, error_text));
        }

        let bytes = response.bytes().await?;
        let data = serde_json::from_slice::<T>(&bytes)?;
        Ok(data)
    }

    /// `GET /rest/v1/{table}` with the given filters.
    pub async fn select<T>(&self, table: &str, query: &Query) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{}{}", table, query.to_query_string());
        self.request(Method::GET, &path, None, None).await
    }

    /// First row matching `query`, if any.
    pub async fn select_one<T>(&self, table: &str, query: &Query) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let rows: Vec<T> = self.select(table, query).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one row and return the stored representation.
    pub async fn insert<T>(&self, table: &str, row: Value) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{}", table);
        self.request(Method::POST, &path, Some(row), Some(RETURN_REPRESENTATION)).await
    }

    /// Insert one row unless it collides with `conflict_columns`; a collision
    /// yields an empty result instead of a conflict error.
    pub async fn insert_ignoring_duplicates<T>(
        &self,
        table: &str,
        row: Value,
        conflict_columns: &str,
    ) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = format!(
            "/rest/v1/{}{}",
            table,
            Query::new().on_conflict(conflict_columns).to_query_string()
        );
        self.request(
            Method::POST,
            &path,
            Some(row),
            Some("return=representation,resolution=ignore-duplicates"),
        )
        .await
    }

    /// Patch every row matching `query` and return the updated rows.
    pub async fn update<T>(&self, table: &str, query: &Query, patch: Value) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{}{}", table, query.to_query_string());
        self.request(Method::PATCH, &path, Some(patch), Some(RETURN_REPRESENTATION)).await
    }

    /// Delete every row matching `query` and return the removed rows.
    pub async fn delete<T>(&self, table: &str, query: &Query) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        if query.is_empty() {
            return Err(StoreError::Config(format!("refusing unfiltered delete on {}", table)));
        }
        let path = format!("/rest/v1/{}{}", table, query.to_query_string());
        self.request(Method::DELETE, &path, None, Some(RETURN_REPRESENTATION)).await
    }
}
