//! FilterActor - sector selection and the derived effective sector.
//!
//! Holds the explicit user choice (`selected`, default `all`) and the
//! profile's own sector. Dependent panels subscribe to the derived
//! *effective* sector, not to the raw inputs: a notification goes out only
//! when the derived value actually changes, so a profile-sector write while
//! a concrete sector is selected causes zero re-fetches, and exactly one
//! per dependent otherwise.

use async_trait::async_trait;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use shared_types::Sector;

use crate::actors::checklist::ChecklistMsg;
use crate::actors::panel::UpdatesPanelMsg;

/// The resolution rule itself, kept pure: the profile sector applies only
/// while the explicit selection is the `all` wildcard.
pub fn effective_sector(selected: Sector, profile_sector: Sector) -> Sector {
    if selected == Sector::All {
        profile_sector
    } else {
        selected
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Messages handled by FilterActor
#[derive(Debug)]
pub enum FilterMsg {
    /// The user picked a sector in the selector
    SetSelected(Sector),
    /// The committed profile's sector changed (successful save)
    SetProfileSector(Sector),
    /// Current derived sector
    GetEffective { reply: RpcReplyPort<Sector> },
    /// Raw inputs plus the derived output
    GetSnapshot { reply: RpcReplyPort<FilterSnapshot> },
}

#[derive(Debug, Clone)]
pub struct FilterSnapshot {
    pub selected: Sector,
    pub profile_sector: Sector,
    pub effective: Sector,
}

// ============================================================================
// Actor Implementation
// ============================================================================

/// Actor owning the sector filter state
#[derive(Debug, Default)]
pub struct FilterActor;

/// Arguments for spawning FilterActor. Dependents are optional so the
/// filter can run standalone (tests, headless use).
pub struct FilterArguments {
    pub profile_sector: Sector,
    pub updates_panel: Option<ActorRef<UpdatesPanelMsg>>,
    pub checklist: Option<ActorRef<ChecklistMsg>>,
}

pub struct FilterState {
    selected: Sector,
    profile_sector: Sector,
    updates_panel: Option<ActorRef<UpdatesPanelMsg>>,
    checklist: Option<ActorRef<ChecklistMsg>>,
}

#[async_trait]
impl Actor for FilterActor {
    type Msg = FilterMsg;
    type State = FilterState;
    type Arguments = FilterArguments;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            actor_id = %myself.get_id(),
            profile_sector = %args.profile_sector,
            "FilterActor starting"
        );

        Ok(FilterState {
            selected: Sector::All,
            profile_sector: args.profile_sector,
            updates_panel: args.updates_panel,
            checklist: args.checklist,
        })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            FilterMsg::SetSelected(sector) => {
                let before = state.effective();
                state.selected = sector;
                self.notify_if_changed(before, state);
            }
            FilterMsg::SetProfileSector(sector) => {
                let before = state.effective();
                state.profile_sector = sector;
                self.notify_if_changed(before, state);
            }
            FilterMsg::GetEffective { reply } => {
                let _ = reply.send(state.effective());
            }
            FilterMsg::GetSnapshot { reply } => {
                let _ = reply.send(FilterSnapshot {
                    selected: state.selected,
                    profile_sector: state.profile_sector,
                    effective: state.effective(),
                });
            }
        }
        Ok(())
    }
}

impl FilterState {
    fn effective(&self) -> Sector {
        effective_sector(self.selected, self.profile_sector)
    }
}

impl FilterActor {
    fn notify_if_changed(&self, before: Sector, state: &FilterState) {
        let after = state.effective();
        if after == before {
            return;
        }

        tracing::info!(
            selected = %state.selected,
            profile_sector = %state.profile_sector,
            effective = %after,
            "Effective sector changed"
        );

        if let Some(panel) = &state.updates_panel {
            let _ = panel.cast(UpdatesPanelMsg::SectorChanged(after));
        }
        if let Some(checklist) = &state.checklist {
            let _ = checklist.cast(ChecklistMsg::SectorChanged(after));
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convenience function to set the explicit sector selection
pub fn set_selected(
    filter: &ActorRef<FilterMsg>,
    sector: Sector,
) -> Result<(), ractor::RactorErr<FilterMsg>> {
    filter
        .cast(FilterMsg::SetSelected(sector))
        .map_err(ractor::RactorErr::from)
}

/// Convenience function to propagate the committed profile's sector
pub fn set_profile_sector(
    filter: &ActorRef<FilterMsg>,
    sector: Sector,
) -> Result<(), ractor::RactorErr<FilterMsg>> {
    filter
        .cast(FilterMsg::SetProfileSector(sector))
        .map_err(ractor::RactorErr::from)
}

/// Convenience function to read the derived sector
pub async fn effective(
    filter: &ActorRef<FilterMsg>,
) -> Result<Sector, ractor::RactorErr<FilterMsg>> {
    ractor::call!(filter, |reply| FilterMsg::GetEffective { reply })
}

/// Convenience function to read the full filter state
pub async fn snapshot(
    filter: &ActorRef<FilterMsg>,
) -> Result<FilterSnapshot, ractor::RactorErr<FilterMsg>> {
    ractor::call!(filter, |reply| FilterMsg::GetSnapshot { reply })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    // ========================================================================
    // Test 1: The resolution rule, exhaustively
    // ========================================================================

    #[test]
    fn test_effective_sector_rule() {
        for profile in Sector::options() {
            // "all" selected: the profile sector wins
            assert_eq!(effective_sector(Sector::All, profile), profile);
            // any concrete selection wins over any profile sector
            for selected in [Sector::Food, Sector::Textile, Sector::It, Sector::Manufacturing] {
                assert_eq!(effective_sector(selected, profile), selected);
            }
        }
    }

    // ========================================================================
    // Test 2: Derived output through the actor
    // ========================================================================

    #[tokio::test]
    async fn test_actor_derives_effective() {
        let (filter, _handle) = Actor::spawn(
            None,
            FilterActor,
            FilterArguments {
                profile_sector: Sector::All,
                updates_panel: None,
                checklist: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(effective(&filter).await.unwrap(), Sector::All);

        set_selected(&filter, Sector::Food).unwrap();
        assert_eq!(effective(&filter).await.unwrap(), Sector::Food);

        // Profile change is masked while a concrete sector is selected
        set_profile_sector(&filter, Sector::Textile).unwrap();
        assert_eq!(effective(&filter).await.unwrap(), Sector::Food);

        // Back to "all": the profile sector shows through
        set_selected(&filter, Sector::All).unwrap();
        assert_eq!(effective(&filter).await.unwrap(), Sector::Textile);

        filter.stop(None);
    }

    // ========================================================================
    // Test 3: Dependents are notified exactly once per effective change
    // ========================================================================

    /// Probe standing in for the updates panel, counting re-key casts.
    struct ProbePanel;

    #[async_trait]
    impl Actor for ProbePanel {
        type Msg = UpdatesPanelMsg;
        type State = Arc<AtomicUsize>;
        type Arguments = Arc<AtomicUsize>;

        async fn pre_start(
            &self,
            _myself: ActorRef<Self::Msg>,
            args: Self::Arguments,
        ) -> Result<Self::State, ActorProcessingErr> {
            Ok(args)
        }

        async fn handle(
            &self,
            _myself: ActorRef<Self::Msg>,
            message: Self::Msg,
            state: &mut Self::State,
        ) -> Result<(), ActorProcessingErr> {
            if let UpdatesPanelMsg::SectorChanged(_) = message {
                state.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_single_notification_per_effective_change() {
        let rekeys = Arc::new(AtomicUsize::new(0));
        let (probe, _probe_handle) = Actor::spawn(None, ProbePanel, rekeys.clone())
            .await
            .unwrap();

        let (filter, _handle) = Actor::spawn(
            None,
            FilterActor,
            FilterArguments {
                profile_sector: Sector::All,
                updates_panel: Some(probe.clone()),
                checklist: None,
            },
        )
        .await
        .unwrap();

        // all -> food via the profile while "all" is selected: one re-key
        set_profile_sector(&filter, Sector::Food).unwrap();
        // food -> textile via explicit selection: one re-key
        set_selected(&filter, Sector::Textile).unwrap();
        // masked profile change: no re-key
        set_profile_sector(&filter, Sector::It).unwrap();
        // same selection again: no re-key
        set_selected(&filter, Sector::Textile).unwrap();

        // Drain both mailboxes
        let _ = effective(&filter).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(rekeys.load(Ordering::SeqCst), 2);

        filter.stop(None);
        probe.stop(None);
    }
}
