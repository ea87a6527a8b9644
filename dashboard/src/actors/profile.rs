//! ProfileEditorActor - draft editing and the guarded save round trip.
//!
//! The committed profile and the draft are separate copies: field edits
//! touch only the draft, and the committed profile is replaced wholesale
//! when (and only when) a save round trip succeeds. One save may be in
//! flight at a time; a second submission is rejected, not queued. A valid
//! save fans out to the filter (new profile sector) and the toast
//! (save-succeeded notice), each exactly once.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use shared_types::{Profile, Sector};
use validator::Validate;

use crate::actors::filter::FilterMsg;
use crate::actors::toast::ToastMsg;
use crate::datasource::{DataSource, DataSourceError};

const SAVED_TOAST: &str = "Profile saved ✔";

// ============================================================================
// Messages
// ============================================================================

/// One draft field edit. The committed profile is never touched by these.
#[derive(Debug, Clone)]
pub enum DraftField {
    Name(String),
    State(String),
    Employees(i64),
    Sector(Sector),
}

/// Messages handled by ProfileEditorActor
#[derive(Debug)]
pub enum ProfileEditorMsg {
    /// Apply one field edit to the draft
    EditDraft(DraftField),
    /// Start a save of the current draft; replies once the save is
    /// accepted (validated and issued), not when it completes
    Save {
        reply: RpcReplyPort<Result<(), ProfileError>>,
    },
    /// The save round trip finished
    SaveResolved {
        result: Result<Profile, DataSourceError>,
    },
    /// Committed profile, draft, and save status
    GetSnapshot {
        reply: RpcReplyPort<ProfileSnapshot>,
    },
}

#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    pub committed: Profile,
    pub draft: Profile,
    pub saving: bool,
    pub last_error: Option<String>,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileError {
    /// Rejected before any backend call; the draft is retained for
    /// correction.
    #[error("invalid profile draft: {0}")]
    Validation(String),

    #[error("a profile save is already in flight")]
    SaveInFlight,
}

/// Validation rules for a draft about to be saved.
#[derive(Debug, Validate)]
struct DraftRules {
    #[validate(length(min = 1, message = "business name is required"))]
    name: String,
    #[validate(range(min = 0, message = "employee count cannot be negative"))]
    employees: i64,
}

fn validate_draft(draft: &Profile) -> Result<(), ProfileError> {
    DraftRules {
        name: draft.name.trim().to_string(),
        employees: draft.employees,
    }
    .validate()
    .map_err(|e| ProfileError::Validation(e.to_string()))
}

// ============================================================================
// Actor Implementation
// ============================================================================

/// Actor owning the committed profile and its edit draft
#[derive(Debug, Default)]
pub struct ProfileEditorActor;

/// Arguments for spawning ProfileEditorActor. Collaborators are optional so
/// the editor can run standalone (tests, headless use).
pub struct ProfileEditorArguments {
    pub source: Arc<dyn DataSource>,
    pub profile: Profile,
    pub filter: Option<ActorRef<FilterMsg>>,
    pub toast: Option<ActorRef<ToastMsg>>,
    pub toast_duration: Duration,
}

pub struct ProfileEditorState {
    source: Arc<dyn DataSource>,
    committed: Profile,
    draft: Profile,
    saving: bool,
    last_error: Option<String>,
    filter: Option<ActorRef<FilterMsg>>,
    toast: Option<ActorRef<ToastMsg>>,
    toast_duration: Duration,
}

#[async_trait]
impl Actor for ProfileEditorActor {
    type Msg = ProfileEditorMsg;
    type State = ProfileEditorState;
    type Arguments = ProfileEditorArguments;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            actor_id = %myself.get_id(),
            name = %args.profile.name,
            sector = %args.profile.sector,
            "ProfileEditorActor starting"
        );

        Ok(ProfileEditorState {
            source: args.source,
            draft: args.profile.clone(),
            committed: args.profile,
            saving: false,
            last_error: None,
            filter: args.filter,
            toast: args.toast,
            toast_duration: args.toast_duration,
        })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            ProfileEditorMsg::EditDraft(field) => {
                match field {
                    DraftField::Name(name) => state.draft.name = name,
                    DraftField::State(region) => state.draft.state = region,
                    DraftField::Employees(count) => state.draft.employees = count,
                    DraftField::Sector(sector) => state.draft.sector = sector,
                }
            }
            ProfileEditorMsg::Save { reply } => {
                let _ = reply.send(self.start_save(&myself, state));
            }
            ProfileEditorMsg::SaveResolved { result } => {
                self.finish_save(result, state);
            }
            ProfileEditorMsg::GetSnapshot { reply } => {
                let _ = reply.send(ProfileSnapshot {
                    committed: state.committed.clone(),
                    draft: state.draft.clone(),
                    saving: state.saving,
                    last_error: state.last_error.clone(),
                });
            }
        }
        Ok(())
    }
}

impl ProfileEditorActor {
    fn start_save(
        &self,
        myself: &ActorRef<ProfileEditorMsg>,
        state: &mut ProfileEditorState,
    ) -> Result<(), ProfileError> {
        if state.saving {
            return Err(ProfileError::SaveInFlight);
        }
        validate_draft(&state.draft)?;

        state.saving = true;
        let source = state.source.clone();
        let draft = state.draft.clone();
        let editor = myself.clone();
        tokio::spawn(async move {
            let result = source.save_profile(draft).await;
            let _ = editor.cast(ProfileEditorMsg::SaveResolved { result });
        });
        Ok(())
    }

    fn finish_save(
        &self,
        result: Result<Profile, DataSourceError>,
        state: &mut ProfileEditorState,
    ) {
        state.saving = false;
        match result {
            Ok(profile) => {
                tracing::info!(name = %profile.name, sector = %profile.sector, "Profile saved");
                state.committed = profile;
                state.last_error = None;

                if let Some(filter) = &state.filter {
                    let _ = filter.cast(FilterMsg::SetProfileSector(state.committed.sector));
                }
                if let Some(toast) = &state.toast {
                    let _ = toast.cast(ToastMsg::Notify {
                        message: SAVED_TOAST.to_string(),
                        duration: state.toast_duration,
                    });
                }
            }
            Err(e) => {
                // Draft and committed profile both stay as they were; the
                // editor is immediately retryable.
                tracing::warn!(error = %e, "Profile save failed");
                state.last_error = Some(e.to_string());
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convenience function to edit one draft field
pub fn edit_draft(
    editor: &ActorRef<ProfileEditorMsg>,
    field: DraftField,
) -> Result<(), ractor::RactorErr<ProfileEditorMsg>> {
    editor
        .cast(ProfileEditorMsg::EditDraft(field))
        .map_err(ractor::RactorErr::from)
}

/// Convenience function to start a save of the current draft
pub async fn save(
    editor: &ActorRef<ProfileEditorMsg>,
) -> Result<Result<(), ProfileError>, ractor::RactorErr<ProfileEditorMsg>> {
    ractor::call!(editor, |reply| ProfileEditorMsg::Save { reply })
}

/// Convenience function to read the editor state
pub async fn snapshot(
    editor: &ActorRef<ProfileEditorMsg>,
) -> Result<ProfileSnapshot, ractor::RactorErr<ProfileEditorMsg>> {
    ractor::call!(editor, |reply| ProfileEditorMsg::GetSnapshot { reply })
}

// ============================================================================
// Tests
// ============================================================================
