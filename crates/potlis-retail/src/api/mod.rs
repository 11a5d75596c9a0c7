//! API clients for the retail catalog and stock services

pub mod catalog;
pub mod client;
pub mod inventory;
mod lenient;
pub mod transport;

pub use catalog::{Product, ProductSearchClient};
pub use client::{ApiClient, decode_body};
pub use inventory::{
    Availability, InventoryClient, InventoryQueryBuilder, Pickup, PickupLocation, Shipping,
    SKU_SEPARATOR,
};
pub use transport::{HttpResponse, ReqwestTransport, Transport, browser_headers};
