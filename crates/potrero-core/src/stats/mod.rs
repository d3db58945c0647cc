//! On-demand herd statistics for a ranch.
//!
//! A snapshot is assembled from four independent persistence sub-queries
//! (gender counts, production summaries, recent events, alert count)
//! dispatched concurrently, so dashboard latency is bounded by the slowest
//! sub-query rather than their sum.
//!
//! A sub-query that fails or misses its deadline degrades to a zero/empty
//! default and is logged; the snapshot itself still succeeds. This keeps a
//! dashboard partially usable when one backend is down. Cancellation is
//! the opposite: dropping the `compute_snapshot` future cancels all
//! in-flight sub-queries and no partial snapshot is observable.
//!
//! Snapshots are computed fresh on every call and never cached here.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::warn;

use crate::domain::{
    AlertPriority, AnimalFilter, Gender, HerdEvent, HerdRepository, ProductionSummary, RanchId,
};
use crate::error::{Error, Result};

/// Default deadline for each persistence sub-query.
const DEFAULT_QUERY_DEADLINE: StdDuration = StdDuration::from_secs(2);

/// Default cap on the recent-events list.
const DEFAULT_EVENT_LIMIT: usize = 20;

/// Point-in-time herd statistics for one ranch. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HerdStatisticsSnapshot {
    pub female_count: u64,
    pub male_count: u64,
    /// Always `female_count + male_count`
    pub total_count: u64,
    pub production_summaries: Vec<ProductionSummary>,
    /// Newest first, bounded by the aggregator's event limit
    pub recent_events: Vec<HerdEvent>,
    /// Unresolved alerts at high or critical priority
    pub active_alert_count: u64,
    pub computed_at: DateTime<Utc>,
}

/// Computes herd statistics snapshots over the herd persistence boundary.
#[derive(Clone)]
pub struct HerdStatisticsAggregator {
    herd: Arc<dyn HerdRepository>,
    query_deadline: StdDuration,
    event_limit: usize,
}

impl HerdStatisticsAggregator {
    /// Create an aggregator with default deadline and event limit.
    #[must_use]
    pub fn new(herd: Arc<dyn HerdRepository>) -> Self {
        Self {
            herd,
            query_deadline: DEFAULT_QUERY_DEADLINE,
            event_limit: DEFAULT_EVENT_LIMIT,
        }
    }

    /// Override the per-sub-query deadline.
    #[must_use]
    pub const fn with_query_deadline(mut self, deadline: StdDuration) -> Self {
        self.query_deadline = deadline;
        self
    }

    /// Override the recent-events cap.
    #[must_use]
    pub const fn with_event_limit(mut self, limit: usize) -> Self {
        self.event_limit = limit;
        self
    }

    /// Compute a fresh snapshot for the ranch over the trailing
    /// `period_days` window ending at `now`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if `period_days` is zero. Sub-query
    /// failures do not error; they degrade to defaults.
    pub async fn compute_snapshot(
        &self,
        ranch_id: &RanchId,
        period_days: u32,
        now: DateTime<Utc>,
    ) -> Result<HerdStatisticsSnapshot> {
        if period_days == 0 {
            return Err(Error::validation("statistics period must be positive"));
        }
        let since = now - Duration::days(i64::from(period_days));

        let (female_count, male_count, production_summaries, recent_events, active_alert_count) = tokio::join!(
            self.guarded("count_females", 0, {
                self.herd.count_animals(
                    ranch_id,
                    AnimalFilter::active().with_gender(Gender::Female),
                )
            }),
            self.guarded("count_males", 0, {
                self.herd
                    .count_animals(ranch_id, AnimalFilter::active().with_gender(Gender::Male))
            }),
            self.guarded("production_summaries", Vec::new(), {
                self.herd.production_summaries(ranch_id, since)
            }),
            self.guarded("recent_events", Vec::new(), {
                self.herd.recent_events(ranch_id, self.event_limit)
            }),
            self.guarded("count_active_alerts", 0, {
                self.herd.count_active_alerts(ranch_id, AlertPriority::High)
            }),
        );

        Ok(HerdStatisticsSnapshot {
            female_count,
            male_count,
            total_count: female_count + male_count,
            production_summaries,
            recent_events,
            active_alert_count,
            computed_at: now,
        })
    }

    /// Run one sub-query under the deadline, degrading errors and timeouts
    /// to the given default.
    async fn guarded<T>(
        &self,
        operation: &'static str,
        default: T,
        query: impl Future<Output = Result<T>>,
    ) -> T {
        match tokio::time::timeout(self.query_deadline, query).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                warn!(operation, error = %e, "statistics sub-query failed, using default");
                default
            }
            Err(_) => {
                warn!(operation, "statistics sub-query timed out, using default");
                default
            }
        }
    }
}
