//! ChecklistActor - merged compliance checklist with sticky toggles.
//!
//! The displayed list is recomputed from templates whenever the effective
//! sector changes: sector-specific items first, then the general bucket.
//! Toggles are remembered by item id for the life of the actor, independent
//! of recomputation, so a toggled item whose id reappears after any number
//! of sector switches keeps its toggled state. Ids never toggled show their
//! template default.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use shared_types::{ChecklistItem, Sector};

use crate::datasource::ChecklistSource;

// ============================================================================
// Messages
// ============================================================================

/// Messages handled by ChecklistActor
#[derive(Debug)]
pub enum ChecklistMsg {
    /// The effective sector changed; recompute the merged list
    SectorChanged(Sector),
    /// Flip one item's completion flag; replies with the new flag
    Toggle {
        id: String,
        reply: RpcReplyPort<Result<bool, ChecklistError>>,
    },
    /// The merged, override-applied list the UI renders
    GetItems {
        reply: RpcReplyPort<Vec<ChecklistItem>>,
    },
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum ChecklistError {
    #[error("checklist item not found: {0}")]
    ItemNotFound(String),
}

// ============================================================================
// Actor Implementation
// ============================================================================

/// Actor owning the merged checklist and its toggle state
#[derive(Debug, Default)]
pub struct ChecklistActor;

/// Arguments for spawning ChecklistActor
pub struct ChecklistArguments {
    pub source: Arc<dyn ChecklistSource>,
    /// Initial effective sector
    pub sector: Sector,
}

pub struct ChecklistState {
    source: Arc<dyn ChecklistSource>,
    sector: Sector,
    items: Vec<ChecklistItem>,
    /// Completion flags the user has touched, keyed by item id. Owned here,
    /// decoupled from the template refresh cycle.
    overrides: HashMap<String, bool>,
}

#[async_trait]
impl Actor for ChecklistActor {
    type Msg = ChecklistMsg;
    type State = ChecklistState;
    type Arguments = ChecklistArguments;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            actor_id = %myself.get_id(),
            sector = %args.sector,
            "ChecklistActor starting"
        );

        let mut state = ChecklistState {
            source: args.source,
            sector: args.sector,
            items: Vec::new(),
            overrides: HashMap::new(),
        };
        state.recompute().await;
        Ok(state)
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            ChecklistMsg::SectorChanged(sector) => {
                if sector != state.sector {
                    state.sector = sector;
                    state.recompute().await;
                }
            }
            ChecklistMsg::Toggle { id, reply } => {
                let _ = reply.send(state.toggle(&id));
            }
            ChecklistMsg::GetItems { reply } => {
                let _ = reply.send(state.items.clone());
            }
        }
        Ok(())
    }
}

impl ChecklistState {
    /// Rebuild the merged list for the current sector, then lay the
    /// remembered toggles over the template defaults.
    async fn recompute(&mut self) {
        match self.source.templates(self.sector).await {
            Ok(mut items) => {
                for item in &mut items {
                    if let Some(done) = self.overrides.get(&item.id) {
                        item.done = *done;
                    }
                }
                tracing::debug!(sector = %self.sector, count = items.len(), "Checklist merged");
                self.items = items;
            }
            Err(e) => {
                // Keep showing the previous list; templates stay retryable
                // on the next sector change.
                tracing::warn!(sector = %self.sector, error = %e, "Checklist templates failed");
            }
        }
    }

    fn toggle(&mut self, id: &str) -> Result<bool, ChecklistError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ChecklistError::ItemNotFound(id.to_string()))?;
        item.done = !item.done;
        self.overrides.insert(id.to_string(), item.done);
        Ok(item.done)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convenience function to re-key the checklist
pub fn set_sector(
    checklist: &ActorRef<ChecklistMsg>,
    sector: Sector,
) -> Result<(), ractor::RactorErr<ChecklistMsg>> {
    checklist
        .cast(ChecklistMsg::SectorChanged(sector))
        .map_err(ractor::RactorErr::from)
}

/// Convenience function to flip one item
pub async fn toggle(
    checklist: &ActorRef<ChecklistMsg>,
    id: impl Into<String>,
) -> Result<Result<bool, ChecklistError>, ractor::RactorErr<ChecklistMsg>> {
    let id = id.into();
    ractor::call!(checklist, |reply| ChecklistMsg::Toggle { id, reply })
}

/// Convenience function to read the merged list
pub async fn items(
    checklist: &ActorRef<ChecklistMsg>,
) -> Result<Vec<ChecklistItem>, ractor::RactorErr<ChecklistMsg>> {
    ractor::call!(checklist, |reply| ChecklistMsg::GetItems { reply })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::MockChecklistSource;

    async fn spawn_checklist(sector: Sector) -> ActorRef<ChecklistMsg> {
        let (checklist, _handle) = Actor::spawn(
            None,
            ChecklistActor,
            ChecklistArguments {
                source: Arc::new(MockChecklistSource),
                sector,
            },
        )
        .await
        .unwrap();
        checklist
    }

    fn find<'a>(list: &'a [ChecklistItem], id: &str) -> &'a ChecklistItem {
        list.iter().find(|i| i.id == id).unwrap()
    }

    // ========================================================================
    // Test 1: Merge is sector items first, then the general bucket
    // ========================================================================

    #[tokio::test]
    async fn test_merge_order_and_length() {
        let checklist = spawn_checklist(Sector::Food).await;

        let list = items(&checklist).await.unwrap();
        assert_eq!(list.len(), 5); // 3 food + 2 general
        assert_eq!(list[0].id, "c1");
        assert_eq!(list[2].id, "c3");
        assert_eq!(list[3].id, "c8");
        assert_eq!(list[4].id, "c9");

        checklist.stop(None);
    }

    // ========================================================================
    // Test 2: A sector without a dedicated template shows the general list
    // ========================================================================

    #[tokio::test]
    async fn test_sector_without_template() {
        let checklist = spawn_checklist(Sector::Manufacturing).await;

        let list = items(&checklist).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "c8");

        checklist.stop(None);
    }

    // ========================================================================
    // Test 3: A toggle survives the food -> textile -> food round trip
    // ========================================================================

    #[tokio::test]
    async fn test_toggle_survives_sector_round_trip() {
        let checklist = spawn_checklist(Sector::Food).await;

        let done = toggle(&checklist, "c1").await.unwrap().unwrap();
        assert!(done); // template default is unchecked

        set_sector(&checklist, Sector::Textile).unwrap();
        let textile = items(&checklist).await.unwrap();
        assert!(textile.iter().all(|i| i.id != "c1"));

        set_sector(&checklist, Sector::Food).unwrap();
        let food = items(&checklist).await.unwrap();
        assert!(find(&food, "c1").done, "toggle lost across sector switch");

        checklist.stop(None);
    }

    // ========================================================================
    // Test 4: Untouched items reset to template defaults on recompute
    // ========================================================================

    #[tokio::test]
    async fn test_untouched_items_keep_template_defaults() {
        let checklist = spawn_checklist(Sector::Food).await;

        set_sector(&checklist, Sector::Textile).unwrap();
        let list = items(&checklist).await.unwrap();

        assert!(find(&list, "c4").done); // textile template says done
        assert!(!find(&list, "c5").done);
        assert!(find(&list, "c8").done); // general defaults untouched

        checklist.stop(None);
    }

    // ========================================================================
    // Test 5: Toggling a default-done item off also sticks
    // ========================================================================

    #[tokio::test]
    async fn test_toggle_off_sticks() {
        let checklist = spawn_checklist(Sector::Food).await;

        let done = toggle(&checklist, "c2").await.unwrap().unwrap();
        assert!(!done); // template default was checked

        set_sector(&checklist, Sector::It).unwrap();
        set_sector(&checklist, Sector::Food).unwrap();

        let list = items(&checklist).await.unwrap();
        assert!(!find(&list, "c2").done);

        checklist.stop(None);
    }

    // ========================================================================
    // Test 6: Toggling an id that is not displayed fails
    // ========================================================================

    #[tokio::test]
    async fn test_toggle_unknown_id() {
        let checklist = spawn_checklist(Sector::Food).await;

        let result = toggle(&checklist, "c6").await.unwrap();
        assert!(matches!(result, Err(ChecklistError::ItemNotFound(_))));

        checklist.stop(None);
    }
}
