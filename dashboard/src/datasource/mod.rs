//! Async seams toward the (excluded) backend.
//!
//! The real system would implement these against `GET /api/updates`,
//! `GET /api/alerts`, `POST /api/profile` and `GET /api/checklist`; this
//! repo ships latency-simulating in-process mocks. The traits are the
//! substitution point: the actors only ever see `Arc<dyn DataSource>` /
//! `Arc<dyn ChecklistSource>`.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared_types::{Alert, ChecklistItem, ComplianceUpdate, Profile, Sector};

mod catalog;
mod mock;

pub use mock::{MockChecklistSource, MockDataSource, MockLatency};

// ============================================================================
// Error Types
// ============================================================================

/// Failure of a backend call. The mock never produces one, but the contract
/// carries it so a real backend can be substituted: callers must keep their
/// previously displayed data and surface a non-blocking indicator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DataSourceError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

// ============================================================================
// Traits
// ============================================================================

/// Backend facade for the updates feed, the alerts list, and profile saves.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Updates scoped to `sector`: items whose sector equals the request or
    /// equals the `all` wildcard.
    ///
    /// `since` is accepted as an input constraint for forward compatibility
    /// only; the mock applies no date filtering, and callers must not assume
    /// date filtering occurs.
    async fn updates(
        &self,
        sector: Sector,
        since: Option<NaiveDate>,
    ) -> Result<Vec<ComplianceUpdate>, DataSourceError>;

    /// The full alert catalog, unfiltered.
    async fn alerts(&self) -> Result<Vec<Alert>, DataSourceError>;

    /// Persist a profile draft; echoes the accepted profile back as the new
    /// canonical one.
    async fn save_profile(&self, draft: Profile) -> Result<Profile, DataSourceError>;
}

/// Backend facade for checklist templates.
///
/// The merge itself is synchronous in this implementation, but the seam is
/// async so a real `GET /api/checklist?sector=...` can slot in.
#[async_trait]
pub trait ChecklistSource: Send + Sync {
    /// The sector-specific template list followed by the general list, in
    /// that fixed order. Sectors without a dedicated template contribute an
    /// empty prefix.
    async fn templates(&self, sector: Sector) -> Result<Vec<ChecklistItem>, DataSourceError>;
}
