//! The product search and stock aggregation pipeline
//!
//! validate → catalog search → stock lookup → correlate → paginate.
//! Every stage that can fail yields a single notice for the caller; there is
//! no partial listing.

use super::context::RequestContext;
use super::correlator::ResultCorrelator;
use super::paginator::{Paginator, dispatch};
use crate::api::{
    ApiClient, InventoryClient, InventoryQueryBuilder, ProductSearchClient, Transport,
};
use crate::config::RetailConfig;
use crate::error::{Result, RetailError};
use crate::interface::{ChatSink, Delivery};
use crate::validator::{Caller, QueryValidator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};

/// Inbound product search, as received from the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCommand {
    pub query: String,
    pub category: Option<String>,
    /// Raw max-count option, validated by the pipeline
    pub max: Option<String>,
}

impl SearchCommand {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: None,
            max: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_max(mut self, max: impl Into<String>) -> Self {
        self.max = Some(max.into());
        self
    }
}

/// Notice for a search that matched nothing
pub fn no_results_notice(query: &str) -> String {
    RetailError::NoResults {
        query: query.to_string(),
    }
    .to_string()
}

/// Notice for any failed upstream step
pub fn failure_notice(query: &str) -> String {
    format!("Failed to get data for query {query}")
}

/// Notice for a search whose matches are all unpurchasable
pub fn unavailable_notice(query: &str) -> String {
    format!("None of the products found with query {query} can be bought right now")
}

/// Runs product searches end to end
#[derive(Clone)]
pub struct AvailabilityPipeline {
    validator: QueryValidator,
    catalog: ProductSearchClient,
    inventory: InventoryClient,
    correlator: ResultCorrelator,
    paginator: Paginator,
    timezone: chrono_tz::Tz,
}

impl AvailabilityPipeline {
    /// Build the pipeline over a shared transport
    pub fn new(config: &RetailConfig, transport: Arc<dyn Transport>) -> Self {
        let api = ApiClient::new(transport);
        Self {
            validator: QueryValidator::new(config.default_max_results),
            catalog: ProductSearchClient::new(api.clone(), config.product_api.clone()),
            inventory: InventoryClient::new(
                api,
                InventoryQueryBuilder::new(config.stock_api.clone(), config.default_location.clone()),
            ),
            correlator: ResultCorrelator::new(config.base_url.clone(), config.description_limit),
            paginator: Paginator::new(config.batch_limit),
            timezone: config.timezone,
        }
    }

    pub fn validator(&self) -> &QueryValidator {
        &self.validator
    }

    /// Compute the messages answering `command` from `caller`
    pub async fn respond(&self, command: &SearchCommand, caller: Caller) -> Vec<Delivery> {
        let context = RequestContext::new(caller, self.timezone);
        self.respond_in(command, &context).await
    }

    /// Compute the messages answering `command` within an existing context
    pub async fn respond_in(&self, command: &SearchCommand, context: &RequestContext) -> Vec<Delivery> {
        let span = info_span!(
            "product_search",
            request_id = %context.request_id,
            query = %command.query,
        );
        self.respond_inner(command, context).instrument(span).await
    }

    async fn respond_inner(&self, command: &SearchCommand, context: &RequestContext) -> Vec<Delivery> {
        let query = &command.query;
        info!("Product query {query} requested by {}", context.caller.id);

        let request = match self.validator.validate(
            query,
            command.category.as_deref(),
            command.max.as_deref(),
            &context.caller,
        ) {
            Ok(request) => request,
            Err(e) => {
                info!("Rejected request: {e}");
                return vec![Delivery::notice(e.to_string())];
            }
        };

        let Some(products) = self.catalog.search(&request).await else {
            info!("Sending API call fail message");
            return vec![Delivery::notice(failure_notice(query))];
        };

        if products.is_empty() {
            info!("Sending no product found for query {query}");
            return vec![Delivery::notice(no_results_notice(query))];
        }

        let Some(availabilities) = self.inventory.lookup(&products).await else {
            info!("Sending API call fail message");
            return vec![Delivery::notice(failure_notice(query))];
        };

        let units = match self
            .correlator
            .correlate(&products, &availabilities, &context.requested_at)
        {
            Ok(units) => units,
            Err(e) => {
                error!("Cannot pair stock with products: {e}");
                return vec![Delivery::notice(failure_notice(query))];
            }
        };
        info!("Created {} display units", units.len());

        if units.is_empty() {
            return vec![Delivery::notice(unavailable_notice(query))];
        }

        self.paginator
            .paginate(units)
            .into_iter()
            .map(Delivery::Batch)
            .collect()
    }

    /// Answer `command` and deliver the result to `sink`
    pub async fn run(&self, command: &SearchCommand, caller: Caller, sink: &dyn ChatSink) -> Result<()> {
        let deliveries = self.respond(command, caller).await;
        dispatch(&deliveries, sink).await
    }
}
