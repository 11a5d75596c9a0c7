//! Product/availability correlation and display formatting
//!
//! Products and availabilities are paired by position: the stock API is
//! trusted to answer in the order the SKUs were submitted. Only the lengths
//! are checked.

use crate::api::{Availability, Pickup, Product, Shipping};
use crate::error::{Result, RetailError};
use crate::interface::DisplayUnit;
use chrono::DateTime;
use chrono_tz::Tz;
use tracing::warn;

/// Separator between stores in the breakdown line
pub const STORE_DELIMITER: &str = " | ";

const ELLIPSIS: &str = "...";

const PRICE_UNAVAILABLE: &str = "N/A";

/// Human label for an upstream stock status token.
///
/// Unknown tokens are returned unchanged.
pub fn status_label(status: &str) -> &str {
    match status {
        "OutOfStock" | "OnlineOnly" => "Out Of Stock",
        "ComingSoon" => "Coming Soon",
        "BackOrder" => "Back Order-able",
        "InStock" | "InStockOnlineOnly" => "In Stock",
        "SoldOutOnline" => "Sold Out",
        "NotAvailable" => "Not Available",
        other => other,
    }
}

/// `[description](link)`, cut to `limit` characters plus `...` when longer
pub fn description_hyperlink(description: &str, link: &str, limit: usize) -> String {
    match description.char_indices().nth(limit) {
        Some((cut, _)) => format!("[{}{ELLIPSIS}]({link})", &description[..cut]),
        None => format!("[{description}]({link})"),
    }
}

/// Online line: status label, plus the remaining quantity when positive
pub fn online_stock_line(shipping: &Shipping) -> String {
    let label = status_label(&shipping.status);
    if shipping.quantity_remaining > 0 {
        format!("{label}: {}", shipping.quantity_remaining)
    } else {
        label.to_string()
    }
}

/// In-store line and, when any store has stock, the per-store breakdown
pub fn in_store_lines(pickup: &Pickup) -> (String, Option<String>) {
    let stocked: Vec<_> = pickup
        .locations
        .iter()
        .filter(|location| location.quantity_on_hand > 0)
        .collect();
    let total: i64 = stocked.iter().map(|location| location.quantity_on_hand).sum();

    let label = status_label(&pickup.status);
    if total > 0 {
        let breakdown = stocked
            .iter()
            .map(|location| format!("**{}** has: {}", location.name, location.quantity_on_hand))
            .collect::<Vec<_>>()
            .join(STORE_DELIMITER);
        (format!("{label}: {total}"), Some(breakdown))
    } else {
        (label.to_string(), None)
    }
}

/// `$<price>` to two decimals, or `N/A` when the catalog gave none
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) => format!("${price:.2}"),
        None => PRICE_UNAVAILABLE.to_string(),
    }
}

pub fn format_timestamp(timestamp: &DateTime<Tz>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S%:z").to_string()
}

/// Builds display units from correlated API results
#[derive(Debug, Clone)]
pub struct ResultCorrelator {
    base_url: String,
    description_limit: usize,
}

impl ResultCorrelator {
    pub fn new(base_url: impl Into<String>, description_limit: usize) -> Self {
        Self {
            base_url: base_url.into(),
            description_limit,
        }
    }

    /// Pair `products[i]` with `availabilities[i]` and format every item that
    /// can still be bought online or in store.
    ///
    /// `requested_at` is shared by every footer of the request.
    pub fn correlate(
        &self,
        products: &[Product],
        availabilities: &[Availability],
        requested_at: &DateTime<Tz>,
    ) -> Result<Vec<DisplayUnit>> {
        if products.len() != availabilities.len() {
            return Err(RetailError::CorrelationMismatch {
                products: products.len(),
                availabilities: availabilities.len(),
            });
        }

        let timestamp = format_timestamp(requested_at);
        let units = products
            .iter()
            .zip(availabilities)
            .filter(|(_, availability)| !availability.is_unpurchasable())
            .map(|(product, availability)| {
                if let Some(echo) = availability.sku.as_deref().filter(|echo| *echo != product.sku) {
                    warn!("Availability for SKU {echo} paired with product SKU {}", product.sku);
                }
                self.display_unit(product, availability, &timestamp)
            })
            .collect();

        Ok(units)
    }

    fn display_unit(&self, product: &Product, availability: &Availability, timestamp: &str) -> DisplayUnit {
        let link = format!("{}{}", self.base_url, product.product_url);
        let (in_store_stock, store_breakdown) = in_store_lines(&availability.pickup);

        DisplayUnit {
            sku: product.sku.clone(),
            title: product.name.clone(),
            description: description_hyperlink(
                &product.short_description,
                &link,
                self.description_limit,
            ),
            regular_price: format_price(product.regular_price),
            sale_price: format_price(product.sale_price),
            image_url: product.thumbnail_image.clone(),
            online_stock: online_stock_line(&availability.shipping),
            in_store_stock,
            store_breakdown,
            footer: format!("SKU: {} requested at: {timestamp}", product.sku),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PickupLocation;
    use chrono::TimeZone;

    fn product(sku: &str) -> Product {
        Product {
            sku: sku.to_string(),
            name: format!("Product {sku}"),
            short_description: format!("Description of {sku}"),
            product_url: format!("/en-ca/product/{sku}"),
            regular_price: Some(199.99),
            sale_price: Some(179.5),
            thumbnail_image: format!("https://img.test/{sku}.jpg"),
        }
    }

    fn availability(online: bool, remaining: i64, in_store: bool) -> Availability {
        Availability {
            sku: None,
            shipping: Shipping {
                purchasable: online,
                quantity_remaining: remaining,
                status: if online { "InStock" } else { "SoldOutOnline" }.to_string(),
            },
            pickup: Pickup {
                purchasable: in_store,
                status: "NotAvailable".to_string(),
                locations: Vec::new(),
            },
        }
    }

    fn requested_at() -> DateTime<Tz> {
        chrono_tz::US::Eastern
            .with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
            .unwrap()
    }

    fn correlator() -> ResultCorrelator {
        ResultCorrelator::new("https://www.bestbuy.ca", 140)
    }

    #[test]
    fn test_status_labels() {
        let table = [
            ("OutOfStock", "Out Of Stock"),
            ("OnlineOnly", "Out Of Stock"),
            ("ComingSoon", "Coming Soon"),
            ("BackOrder", "Back Order-able"),
            ("InStock", "In Stock"),
            ("InStockOnlineOnly", "In Stock"),
            ("SoldOutOnline", "Sold Out"),
            ("NotAvailable", "Not Available"),
        ];
        for (token, label) in table {
            assert_eq!(status_label(token), label);
        }
        assert_eq!(status_label("instock"), "instock");
        assert_eq!(status_label("Preorder"), "Preorder");
    }

    #[test]
    fn test_description_short_is_complete() {
        let text = "a".repeat(140);
        let link = description_hyperlink(&text, "https://x.test/p", 140);
        assert_eq!(link, format!("[{text}](https://x.test/p)"));
        assert!(!link.contains("..."));
    }

    #[test]
    fn test_description_long_is_truncated() {
        let text = format!("{}{}", "b".repeat(140), "tail");
        let link = description_hyperlink(&text, "https://x.test/p", 140);
        assert_eq!(link, format!("[{}...](https://x.test/p)", "b".repeat(140)));
    }

    #[test]
    fn test_description_truncates_on_characters() {
        let text = "é".repeat(150);
        let link = description_hyperlink(&text, "u", 140);
        assert_eq!(link, format!("[{}...](u)", "é".repeat(140)));
    }

    #[test]
    fn test_unpurchasable_items_are_skipped() {
        let products = [product("A"), product("B")];
        let availabilities = [availability(true, 5, false), availability(false, 0, false)];

        let units = correlator()
            .correlate(&products, &availabilities, &requested_at())
            .unwrap();

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].sku, "A");
        assert_eq!(units[0].online_stock, "In Stock: 5");
        assert_eq!(units[0].in_store_stock, "Not Available");
        assert_eq!(units[0].store_breakdown, None);
    }

    #[test]
    fn test_display_unit_fields() {
        let units = correlator()
            .correlate(&[product("42")], &[availability(true, 0, true)], &requested_at())
            .unwrap();
        let unit = &units[0];

        assert_eq!(unit.title, "Product 42");
        assert_eq!(
            unit.description,
            "[Description of 42](https://www.bestbuy.ca/en-ca/product/42)"
        );
        assert_eq!(unit.regular_price, "$199.99");
        assert_eq!(unit.sale_price, "$179.50");
        assert_eq!(unit.image_url, "https://img.test/42.jpg");
        assert_eq!(unit.online_stock, "In Stock");
        assert_eq!(unit.footer, "SKU: 42 requested at: 2024-01-15 09:30:00-05:00");
    }

    #[test]
    fn test_missing_price_renders_unavailable() {
        let mut item = product("7");
        item.sale_price = None;
        item.thumbnail_image = String::new();

        let units = correlator()
            .correlate(&[item], &[availability(true, 2, false)], &requested_at())
            .unwrap();
        assert_eq!(units[0].regular_price, "$199.99");
        assert_eq!(units[0].sale_price, "N/A");
        assert_eq!(units[0].image_url, "");
    }

    #[test]
    fn test_in_store_breakdown() {
        let pickup = Pickup {
            purchasable: true,
            status: "InStock".to_string(),
            locations: vec![
                PickupLocation { name: "Downtown".to_string(), quantity_on_hand: 3 },
                PickupLocation { name: "Airport".to_string(), quantity_on_hand: 0 },
                PickupLocation { name: "Mall".to_string(), quantity_on_hand: 4 },
            ],
        };

        let (line, breakdown) = in_store_lines(&pickup);
        assert_eq!(line, "In Stock: 7");
        assert_eq!(breakdown.as_deref(), Some("**Downtown** has: 3 | **Mall** has: 4"));
    }

    #[test]
    fn test_in_store_without_stock() {
        let pickup = Pickup {
            purchasable: true,
            status: "BackOrder".to_string(),
            locations: vec![PickupLocation { name: "Downtown".to_string(), quantity_on_hand: 0 }],
        };
        assert_eq!(in_store_lines(&pickup), ("Back Order-able".to_string(), None));
    }

    #[test]
    fn test_order_preserved() {
        let products = [product("1"), product("2"), product("3"), product("4")];
        let availabilities = [
            availability(true, 1, false),
            availability(false, 0, false),
            availability(false, 0, true),
            availability(true, 2, true),
        ];
        let units = correlator()
            .correlate(&products, &availabilities, &requested_at())
            .unwrap();
        let skus: Vec<_> = units.iter().map(|u| u.sku.as_str()).collect();
        assert_eq!(skus, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_length_mismatch() {
        let err = correlator()
            .correlate(&[product("1"), product("2")], &[availability(true, 1, true)], &requested_at())
            .unwrap_err();
        assert!(matches!(
            err,
            RetailError::CorrelationMismatch { products: 2, availabilities: 1 }
        ));
    }
}
