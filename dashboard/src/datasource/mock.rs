//! Latency-simulating in-process backend.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared_types::{Alert, ChecklistItem, ComplianceUpdate, Profile, Sector};

use super::{catalog, ChecklistSource, DataSource, DataSourceError};
use crate::config::Config;

/// Per-operation simulated latencies.
#[derive(Debug, Clone)]
pub struct MockLatency {
    pub updates: Duration,
    pub alerts: Duration,
    pub save: Duration,
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            updates: Duration::from_millis(500),
            alerts: Duration::from_millis(300),
            save: Duration::from_millis(300),
        }
    }
}

impl From<&Config> for MockLatency {
    fn from(config: &Config) -> Self {
        Self {
            updates: config.updates_latency,
            alerts: config.alerts_latency,
            save: config.save_latency,
        }
    }
}

/// Mock backend serving the canned catalog after a fixed delay. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    latency: MockLatency,
}

impl MockDataSource {
    pub fn new(latency: MockLatency) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn updates(
        &self,
        sector: Sector,
        _since: Option<NaiveDate>,
    ) -> Result<Vec<ComplianceUpdate>, DataSourceError> {
        // `_since` is deliberately unapplied; see the trait contract.
        tokio::time::sleep(self.latency.updates).await;
        Ok(catalog::updates()
            .into_iter()
            .filter(|u| sector.matches(u.sector))
            .collect())
    }

    async fn alerts(&self) -> Result<Vec<Alert>, DataSourceError> {
        tokio::time::sleep(self.latency.alerts).await;
        Ok(catalog::alerts())
    }

    async fn save_profile(&self, draft: Profile) -> Result<Profile, DataSourceError> {
        tokio::time::sleep(self.latency.save).await;
        Ok(draft)
    }
}

/// Checklist templates resolved from the in-process catalog. Resolves
/// immediately; the latency-free path is what keeps the merge effectively
/// synchronous in this implementation.
#[derive(Debug, Clone, Default)]
pub struct MockChecklistSource;

#[async_trait]
impl ChecklistSource for MockChecklistSource {
    async fn templates(&self, sector: Sector) -> Result<Vec<ChecklistItem>, DataSourceError> {
        let mut items = catalog::checklist_for(sector);
        items.extend(catalog::checklist_general());
        Ok(items)
    }
}

// ============================================================================
// Tests
// ============================================================================
