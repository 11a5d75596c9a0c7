//! Splitting display units into deliverable batches

use crate::error::Result;
use crate::interface::{ChatSink, Delivery, DisplayUnit};
use tracing::info;

/// Splits results into the fewest messages the transport allows
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    limit: usize,
}

impl Paginator {
    /// `limit` is the per-message unit cap; zero is treated as one
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Batch sizes for `n` units.
    ///
    /// Uses ⌈n/limit⌉ batches whose sizes differ by at most one, larger
    /// batches first. 23 units at a limit of 10 give `[8, 8, 7]`.
    pub fn batch_sizes(&self, n: usize) -> Vec<usize> {
        if n == 0 {
            return Vec::new();
        }
        let batches = n.div_ceil(self.limit);
        let base = n / batches;
        let larger = n % batches;
        (0..batches)
            .map(|i| if i < larger { base + 1 } else { base })
            .collect()
    }

    /// Split `units` into consecutive batches, preserving order
    pub fn paginate(&self, units: Vec<DisplayUnit>) -> Vec<Vec<DisplayUnit>> {
        let mut remaining = units.into_iter();
        self.batch_sizes(remaining.len())
            .into_iter()
            .map(|size| remaining.by_ref().take(size).collect())
            .collect()
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Hand each delivery to the sink in order, stopping at the first failure
pub async fn dispatch(deliveries: &[Delivery], sink: &dyn ChatSink) -> Result<()> {
    for delivery in deliveries {
        sink.deliver(delivery).await?;
        match delivery {
            Delivery::Batch(units) => info!("Sent {} display units to {:?}", units.len(), sink.platform()),
            Delivery::Notice(_) => info!("Sent notice to {:?}", sink.platform()),
        }
    }
    Ok(())
}
