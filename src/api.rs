use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{FetchError, Operation};
use crate::models::{Product, ProductDraft};
use crate::settings::ApiSettings;

/// The product operations the admin UI needs from a backend.
#[async_trait(?Send)]
pub trait ProductApi {
    async fn list(&self) -> Result<Vec<Product>, FetchError>;
    async fn get(&self, id: i64) -> Result<Product, FetchError>;
    async fn create(&self, draft: &ProductDraft) -> Result<Product, FetchError>;
    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Product, FetchError>;
    async fn delete(&self, id: i64) -> Result<(), FetchError>;
}

/// `ProductApi` over HTTP against a single collection endpoint such as
/// `http://localhost:8080/api/products`.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: Client,
    base_url: String,
}

/// Operator prompts block the runtime thread, so the connection tasks that
/// would notice a backend closing an idle socket never run. Every request
/// therefore opens its own connection.
fn unpooled() -> ClientBuilder {
    Client::builder().pool_max_idle_per_host(0)
}

impl HttpProductApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = unpooled().build().unwrap_or_else(|_| Client::new());
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpProductApi { client, base_url }
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, reqwest::Error> {
        let client = unpooled().timeout(settings.timeout()).build()?;
        Ok(Self::with_client(client, settings.base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn send(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, FetchError> {
        let response = request.send().await.map_err(|e| {
            warn!(%operation, error = %e, "product request failed to complete");
            FetchError::new(operation)
        })?;

        if !response.status().is_success() {
            warn!(%operation, status = %response.status(), "product request rejected");
            return Err(FetchError::new(operation));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        operation: Operation,
        response: Response,
    ) -> Result<T, FetchError> {
        response.json::<T>().await.map_err(|e| {
            warn!(%operation, error = %e, "product response body could not be decoded");
            FetchError::new(operation)
        })
    }
}

#[async_trait(?Send)]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> Result<Vec<Product>, FetchError> {
        debug!(url = %self.base_url, "GET product list");
        let response = self
            .send(Operation::List, self.client.get(&self.base_url))
            .await?;
        let products: Option<Vec<Product>> = Self::decode(Operation::List, response).await?;
        Ok(products.unwrap_or_default())
    }

    async fn get(&self, id: i64) -> Result<Product, FetchError> {
        debug!(id, "GET product");
        let response = self
            .send(Operation::Get, self.client.get(self.item_url(id)))
            .await?;
        Self::decode(Operation::Get, response).await
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, FetchError> {
        debug!(name = %draft.name, "POST product");
        let response = self
            .send(Operation::Create, self.client.post(&self.base_url).json(draft))
            .await?;
        Self::decode(Operation::Create, response).await
    }

    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Product, FetchError> {
        debug!(id, "PUT product");
        let response = self
            .send(Operation::Update, self.client.put(self.item_url(id)).json(draft))
            .await?;
        Self::decode(Operation::Update, response).await
    }

    async fn delete(&self, id: i64) -> Result<(), FetchError> {
        debug!(id, "DELETE product");
        self.send(Operation::Delete, self.client.delete(self.item_url(id)))
            .await?;
        Ok(())
    }
}
