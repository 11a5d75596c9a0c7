//! Retail availability aggregation engine

pub mod context;
pub mod correlator;
pub mod paginator;
pub mod pipeline;

pub use context::RequestContext;
pub use correlator::{ResultCorrelator, status_label};
pub use paginator::{Paginator, dispatch};
pub use pipeline::{AvailabilityPipeline, SearchCommand};
