//! Product catalog search client

use super::client::ApiClient;
use super::lenient::{lenient_price, nullable_string};
use crate::validator::SearchRequest;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Catalog product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub sku: String,
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub short_description: String,
    /// Relative to the storefront base URL
    pub product_url: String,
    /// Absent when the catalog sends null or a non-numeric value
    #[serde(default, deserialize_with = "lenient_price")]
    pub regular_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub sale_price: Option<f64>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub thumbnail_image: String,
}

/// Searches the catalog API
#[derive(Clone)]
pub struct ProductSearchClient {
    api: ApiClient,
    template: String,
}

impl ProductSearchClient {
    /// Create a client for the given URL template
    ///
    /// The template may contain `{category}`, `{max}` and `{query}`.
    pub fn new(api: ApiClient, template: impl Into<String>) -> Self {
        Self {
            api,
            template: template.into(),
        }
    }

    /// Substitute the request into the URL template
    pub fn search_url(&self, request: &SearchRequest) -> String {
        let category = request.category.as_deref().unwrap_or_default();
        self.template
            .replace("{category}", &urlencoding::encode(category))
            .replace("{max}", &request.max_count.to_string())
            .replace("{query}", &urlencoding::encode(&request.query))
    }

    /// Search the catalog.
    ///
    /// `None` means the call failed; `Some` with an empty list means nothing
    /// matched.
    pub async fn search(&self, request: &SearchRequest) -> Option<Vec<Product>> {
        let url = self.search_url(request);
        let products: Option<Vec<Product>> = self.api.fetch_field_or_absent(&url, "products").await;
        if let Some(products) = &products {
            info!("Catalog returned {} products for {:?}", products.len(), request.query);
        }
        products
    }
}
