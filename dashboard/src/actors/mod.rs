pub mod assistant;
pub mod checklist;
pub mod filter;
pub mod panel;
pub mod profile;
pub mod toast;

pub use assistant::{AssistantActor, AssistantArguments, CannedScript};
pub use checklist::{ChecklistActor, ChecklistArguments};
pub use filter::{FilterActor, FilterArguments};
pub use panel::{AlertsFetch, PanelActor, PanelArguments, UpdatesFetch};
pub use profile::{ProfileEditorActor, ProfileEditorArguments};
pub use toast::ToastActor;
