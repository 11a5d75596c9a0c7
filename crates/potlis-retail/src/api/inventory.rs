//! Stock availability lookup

use super::catalog::Product;
use super::client::ApiClient;
use super::lenient::{lenient_bool, lenient_quantity};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Percent-encoded `|`, the separator between SKUs in a stock lookup
pub const SKU_SEPARATOR: &str = "%7C";

/// Availability record for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Echo of the looked-up SKU, when the API includes it
    #[serde(default)]
    pub sku: Option<String>,
    pub shipping: Shipping,
    pub pickup: Pickup,
}

impl Availability {
    /// Neither shippable nor available for pickup
    pub fn is_unpurchasable(&self) -> bool {
        !self.pickup.purchasable && !self.shipping.purchasable
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipping {
    #[serde(deserialize_with = "lenient_bool")]
    pub purchasable: bool,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity_remaining: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    #[serde(deserialize_with = "lenient_bool")]
    pub purchasable: bool,
    pub status: String,
    #[serde(default)]
    pub locations: Vec<PickupLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupLocation {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity_on_hand: i64,
}

/// Builds the batched stock lookup URL
#[derive(Debug, Clone)]
pub struct InventoryQueryBuilder {
    template: String,
    location: String,
}

impl InventoryQueryBuilder {
    /// `template` must contain `{location}` and `{skus}`
    pub fn new(template: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            location: location.into(),
        }
    }

    /// SKUs in product order, joined by [`SKU_SEPARATOR`]
    pub fn sku_list(products: &[Product]) -> String {
        products
            .iter()
            .map(|p| urlencoding::encode(&p.sku))
            .collect::<Vec<_>>()
            .join(SKU_SEPARATOR)
    }

    pub fn build(&self, products: &[Product]) -> String {
        let skus = Self::sku_list(products);
        info!("Building inventory api call for {} skus", products.len());
        self.template
            .replace("{location}", &urlencoding::encode(&self.location))
            .replace("{skus}", &skus)
    }
}

/// Looks up stock for a list of products
#[derive(Clone)]
pub struct InventoryClient {
    api: ApiClient,
    builder: InventoryQueryBuilder,
}

impl InventoryClient {
    pub fn new(api: ApiClient, builder: InventoryQueryBuilder) -> Self {
        Self { api, builder }
    }

    pub fn builder(&self) -> &InventoryQueryBuilder {
        &self.builder
    }

    /// Fetch availabilities in the same order as `products`.
    ///
    /// `None` means the call failed. An empty product list needs no call.
    pub async fn lookup(&self, products: &[Product]) -> Option<Vec<Availability>> {
        if products.is_empty() {
            return Some(Vec::new());
        }

        let url = self.builder.build(products);
        self.api.fetch_field_or_absent(&url, "availabilities").await
    }
}
