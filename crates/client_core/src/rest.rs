use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{Product, ProductId},
    error::FieldErrors,
    protocol::ProductDraft,
};

use crate::{error::RemoteError, CollectionClient};

/// REST access to the remote `products/` collection.
pub struct RestCollectionClient {
    http: Client,
    base_url: String,
}

impl RestCollectionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/products/", self.base_url)
    }

    fn item_url(&self, id: ProductId) -> String {
        format!("{}/products/{}/", self.base_url, id.0)
    }
}

#[async_trait]
impl CollectionClient for RestCollectionClient {
    async fn list(&self) -> Result<Vec<Product>, RemoteError> {
        let products = self
            .http
            .get(self.collection_url())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(products)
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, RemoteError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Validation failures carry a field -> message(s) object; anything
        // else is reported by status alone.
        match response.json::<FieldErrors>().await {
            Ok(fields) if !fields.is_empty() => Err(RemoteError::Rejected(fields)),
            _ => Err(RemoteError::Status(status)),
        }
    }

    async fn remove(&self, id: ProductId) -> Result<(), RemoteError> {
        self.http
            .delete(self.item_url(id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/rest_tests.rs"]
mod tests;
