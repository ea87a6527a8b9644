//! PanelActor - load lifecycle for the Updates and Alerts panels.
//!
//! Each panel owns one displayed collection and re-fetches it whenever its
//! effective sector key changes or a manual refresh is requested. Fetches
//! run in spawned tasks tagged with a monotonically increasing sequence
//! number; the panel adopts a resolution only if it is still the latest
//! issued request. An older request that resolves later is discarded, never
//! applied - the displayed collection always corresponds to the most
//! recently issued request, regardless of resolution order.
//!
//! Cancellation is advisory: in-flight tasks are not aborted, their results
//! are just ignored on arrival.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use shared_types::{Alert, ComplianceUpdate, FetchPhase, Sector};

use crate::datasource::{DataSource, DataSourceError};

// ============================================================================
// Fetch Seam
// ============================================================================

/// Produces one panel's collection for an effective sector key.
#[async_trait]
pub trait PanelFetch: Send + Sync + 'static {
    type Item: Clone + std::fmt::Debug + Send + Sync + 'static;

    async fn fetch(
        &self,
        sector: Sector,
        since: Option<NaiveDate>,
    ) -> Result<Vec<Self::Item>, DataSourceError>;
}

/// Updates feed: sector-scoped, with the forward-compatible `since` bound.
pub struct UpdatesFetch {
    pub source: Arc<dyn DataSource>,
}

#[async_trait]
impl PanelFetch for UpdatesFetch {
    type Item = ComplianceUpdate;

    async fn fetch(
        &self,
        sector: Sector,
        since: Option<NaiveDate>,
    ) -> Result<Vec<ComplianceUpdate>, DataSourceError> {
        self.source.updates(sector, since).await
    }
}

/// Alerts list: unfiltered, the key and date bound are ignored.
pub struct AlertsFetch {
    pub source: Arc<dyn DataSource>,
}

#[async_trait]
impl PanelFetch for AlertsFetch {
    type Item = Alert;

    async fn fetch(
        &self,
        _sector: Sector,
        _since: Option<NaiveDate>,
    ) -> Result<Vec<Alert>, DataSourceError> {
        self.source.alerts().await
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Messages handled by PanelActor
#[derive(Debug)]
pub enum PanelMsg<T>
where
    T: Clone + std::fmt::Debug + Send + Sync + 'static,
{
    /// The panel's effective sector key changed; re-key and re-fetch.
    SectorChanged(Sector),
    /// Update the date bound used by subsequent fetches (no implicit reload).
    SetSince(NaiveDate),
    /// Re-issue a request for the current key.
    Refresh,
    /// A spawned fetch finished; applied only if still the latest issued.
    Resolved {
        seq: u64,
        sector: Sector,
        result: Result<Vec<T>, DataSourceError>,
    },
    /// Get the panel's current display state.
    GetSnapshot { reply: RpcReplyPort<PanelSnapshot<T>> },
}

pub type UpdatesPanelMsg = PanelMsg<ComplianceUpdate>;
pub type AlertsPanelMsg = PanelMsg<Alert>;

/// What the UI renders for one panel.
#[derive(Debug, Clone)]
pub struct PanelSnapshot<T> {
    pub phase: FetchPhase,
    /// The last-requested key
    pub sector: Sector,
    /// The key the displayed collection was fetched for. Differs from
    /// `sector` only while a re-keyed load is still in flight.
    pub applied_sector: Option<Sector>,
    pub items: Vec<T>,
    pub last_issued: u64,
    pub last_applied: u64,
    pub last_error: Option<String>,
}

// ============================================================================
// Actor Implementation
// ============================================================================

/// Actor owning one panel's load lifecycle.
#[derive(Debug)]
pub struct PanelActor<F: PanelFetch>(PhantomData<fn() -> F>);

impl<F: PanelFetch> Default for PanelActor<F> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

/// Arguments for spawning a PanelActor
pub struct PanelArguments<F: PanelFetch> {
    /// Panel label used in logs ("updates", "alerts")
    pub name: &'static str,
    pub fetch: Arc<F>,
    /// Initial effective sector key
    pub sector: Sector,
    /// Initial date bound for the feed, if the panel uses one
    pub since: Option<NaiveDate>,
}

/// State for PanelActor
pub struct PanelState<F: PanelFetch> {
    name: &'static str,
    fetch: Arc<F>,
    sector: Sector,
    applied_sector: Option<Sector>,
    since: Option<NaiveDate>,
    phase: FetchPhase,
    items: Vec<F::Item>,
    last_issued: u64,
    last_applied: u64,
    last_error: Option<String>,
}

#[async_trait]
impl<F: PanelFetch> Actor for PanelActor<F> {
    type Msg = PanelMsg<F::Item>;
    type State = PanelState<F>;
    type Arguments = PanelArguments<F>;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            actor_id = %myself.get_id(),
            panel = args.name,
            sector = %args.sector,
            "PanelActor starting"
        );

        Ok(PanelState {
            name: args.name,
            fetch: args.fetch,
            sector: args.sector,
            applied_sector: None,
            since: args.since,
            phase: FetchPhase::Idle,
            items: Vec::new(),
            last_issued: 0,
            last_applied: 0,
            last_error: None,
        })
    }

    async fn post_start(
        &self,
        myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        // Initial load for the starting key
        self.issue_fetch(&myself, state);
        Ok(())
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            PanelMsg::SectorChanged(sector) => {
                if sector == state.sector {
                    tracing::debug!(panel = state.name, sector = %sector, "Sector unchanged");
                } else {
                    state.sector = sector;
                    self.issue_fetch(&myself, state);
                }
            }
            PanelMsg::SetSince(date) => {
                state.since = Some(date);
            }
            PanelMsg::Refresh => {
                self.issue_fetch(&myself, state);
            }
            PanelMsg::Resolved {
                seq,
                sector,
                result,
            } => {
                self.apply_resolution(seq, sector, result, state);
            }
            PanelMsg::GetSnapshot { reply } => {
                let _ = reply.send(PanelSnapshot {
                    phase: state.phase,
                    sector: state.sector,
                    applied_sector: state.applied_sector,
                    items: state.items.clone(),
                    last_issued: state.last_issued,
                    last_applied: state.last_applied,
                    last_error: state.last_error.clone(),
                });
            }
        }
        Ok(())
    }

    async fn post_stop(
        &self,
        myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        tracing::info!(
            actor_id = %myself.get_id(),
            panel = state.name,
            "PanelActor stopped"
        );
        Ok(())
    }
}

// ============================================================================
// Load Lifecycle
// ============================================================================

impl<F: PanelFetch> PanelActor<F> {
    /// Issue a new request for the current key. The previous in-flight
    /// request (if any) keeps running but can no longer win: only the
    /// sequence number assigned here will be accepted on resolution.
    fn issue_fetch(&self, myself: &ActorRef<PanelMsg<F::Item>>, state: &mut PanelState<F>) {
        state.last_issued += 1;
        state.phase = FetchPhase::Loading;
        let seq = state.last_issued;

        tracing::debug!(panel = state.name, seq, sector = %state.sector, "Issuing fetch");

        let fetch = state.fetch.clone();
        let sector = state.sector;
        let since = state.since;
        let panel = myself.clone();
        tokio::spawn(async move {
            let result = fetch.fetch(sector, since).await;
            // The panel may have been stopped meanwhile; nothing to do then.
            let _ = panel.cast(PanelMsg::Resolved {
                seq,
                sector,
                result,
            });
        });
    }

    fn apply_resolution(
        &self,
        seq: u64,
        sector: Sector,
        result: Result<Vec<F::Item>, DataSourceError>,
        state: &mut PanelState<F>,
    ) {
        if seq != state.last_issued {
            // Stale response: a newer request was issued while this one was
            // in flight. Displayed state stays with the latest request.
            tracing::debug!(
                panel = state.name,
                seq,
                latest = state.last_issued,
                "Discarding stale response"
            );
            return;
        }

        state.last_applied = seq;
        state.applied_sector = Some(sector);
        match result {
            Ok(items) => {
                tracing::info!(panel = state.name, seq, count = items.len(), "Panel loaded");
                state.items = items;
                state.phase = FetchPhase::Loaded;
                state.last_error = None;
            }
            Err(e) => {
                // Keep the previously displayed collection; the failure is
                // surfaced through the phase and retry stays available.
                tracing::warn!(panel = state.name, seq, error = %e, "Panel fetch failed");
                state.phase = FetchPhase::Failed;
                state.last_error = Some(e.to_string());
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convenience function to re-key a panel
pub fn set_sector<T>(
    panel: &ActorRef<PanelMsg<T>>,
    sector: Sector,
) -> Result<(), ractor::RactorErr<PanelMsg<T>>>
where
    T: Clone + std::fmt::Debug + Send + Sync + 'static,
{
    panel
        .cast(PanelMsg::SectorChanged(sector))
        .map_err(ractor::RactorErr::from)
}

/// Convenience function to update the feed date bound
pub fn set_since<T>(
    panel: &ActorRef<PanelMsg<T>>,
    date: NaiveDate,
) -> Result<(), ractor::RactorErr<PanelMsg<T>>>
where
    T: Clone + std::fmt::Debug + Send + Sync + 'static,
{
    panel
        .cast(PanelMsg::SetSince(date))
        .map_err(ractor::RactorErr::from)
}

/// Convenience function to request a manual refresh
pub fn refresh<T>(panel: &ActorRef<PanelMsg<T>>) -> Result<(), ractor::RactorErr<PanelMsg<T>>>
where
    T: Clone + std::fmt::Debug + Send + Sync + 'static,
{
    panel.cast(PanelMsg::Refresh).map_err(ractor::RactorErr::from)
}

/// Convenience function to read the panel's display state
pub async fn snapshot<T>(
    panel: &ActorRef<PanelMsg<T>>,
) -> Result<PanelSnapshot<T>, ractor::RactorErr<PanelMsg<T>>>
where
    T: Clone + std::fmt::Debug + Send + Sync + 'static,
{
    ractor::call!(panel, |reply| PanelMsg::GetSnapshot { reply })
}

// ============================================================================
// Tests
// ============================================================================
