//! Shared types between the dashboard core and the frontend
//!
//! These types are used by both:
//! - ractor actors (native Rust)
//! - the JSON frontend (excluded from this repo)
//!
//! Serializable with serde; field names follow the HTTP boundary contract
//! (`GET updates?sector=...`, `GET alerts?msmeId=...`, `POST profile`,
//! `GET checklist?sector=...`), so `ComplianceUpdate` uses camelCase.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============================================================================
// Sectors
// ============================================================================

/// Business-category key used to scope compliance content.
///
/// `All` is a wildcard on both sides of a match: selecting `All` matches
/// every update, and an update tagged `All` matches every selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../frontend/src/types/generated.ts")]
pub enum Sector {
    Food,
    Textile,
    It,
    Manufacturing,
    All,
}

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Textile => "textile",
            Self::It => "it",
            Self::Manufacturing => "manufacturing",
            Self::All => "all",
        }
    }

    /// Human-readable label shown in the sector selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Processed Food / Restaurants",
            Self::Textile => "Textile / Apparel",
            Self::It => "IT / Services",
            Self::Manufacturing => "Manufacturing",
            Self::All => "All Sectors",
        }
    }

    /// Parse a sector key, case-insensitively. Unknown keys yield `None`.
    pub fn parse(input: &str) -> Option<Sector> {
        match input.trim().to_ascii_lowercase().as_str() {
            "food" => Some(Self::Food),
            "textile" => Some(Self::Textile),
            "it" => Some(Self::It),
            "manufacturing" => Some(Self::Manufacturing),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Wildcard matching rule for scoping content to a requested sector:
    /// an item belongs in the result when its sector equals the request or
    /// either side is `All`.
    pub fn matches(&self, item_sector: Sector) -> bool {
        *self == Sector::All || item_sector == Sector::All || *self == item_sector
    }

    /// Every selectable sector, in the order the selector shows them.
    pub fn options() -> [Sector; 5] {
        [
            Self::Food,
            Self::Textile,
            Self::It,
            Self::Manufacturing,
            Self::All,
        ]
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Feed Content
// ============================================================================

/// A regulatory update in the discovery feed. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../../frontend/src/types/generated.ts")]
pub struct ComplianceUpdate {
    pub id: String,
    pub title: String,
    pub url: String,
    pub updated_at: NaiveDate,
    pub tags: Vec<String>,
    pub summary: String,
    pub sector: Sector,
}

/// Deadline severity. Anything the backend sends outside the known three
/// falls back to `Unknown`, which the UI renders with the default badge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../frontend/src/types/generated.ts")]
pub enum Severity {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

/// An upcoming deadline or compliance alert. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated.ts")]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub due: NaiveDate,
    pub severity: Severity,
    pub action: String,
}

/// One checklist row. `done` is the only mutable field; `id` is stable
/// across recomputation so toggles can be carried over by id-matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated.ts")]
pub struct ChecklistItem {
    pub id: String,
    pub item: String,
    pub done: bool,
}

// ============================================================================
// Profile
// ============================================================================

/// The MSME profile, replaced wholesale on a successful save.
///
/// `employees` is signed so that a malformed draft (negative count) can be
/// represented and rejected by validation instead of wrapping silently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated.ts")]
pub struct Profile {
    pub name: String,
    pub state: String,
    pub employees: i64,
    pub sector: Sector,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Acme MSME".to_string(),
            state: "Gujarat".to_string(),
            employees: 18,
            sector: Sector::All,
        }
    }
}

// ============================================================================
// Panel Lifecycle
// ============================================================================

/// Load lifecycle of a data panel. `Loaded` with an empty collection is the
/// explicit "no data" state, distinct from `Loading`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../frontend/src/types/generated.ts")]
pub enum FetchPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

// ============================================================================
// Assistant Chat
// ============================================================================

/// Chat message for UI display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated.ts")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub pending: bool, // True while the assistant reply is still in flight
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated.ts")]
pub enum Sender {
    User,
    Assistant,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Assistant)
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
            pending: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ts_rs::Config;

    #[test]
    fn test_sector_round_trip() {
        for sector in Sector::options() {
            let json = serde_json::to_string(&sector).unwrap();
            assert_eq!(json, format!("\"{}\"", sector.as_str()));
            let back: Sector = serde_json::from_str(&json).unwrap();
            assert_eq!(back, sector);
        }
    }

    #[test]
    fn test_sector_parse_is_case_insensitive() {
        assert_eq!(Sector::parse("Food"), Some(Sector::Food));
        assert_eq!(Sector::parse("  TEXTILE "), Some(Sector::Textile));
        assert_eq!(Sector::parse("plastics"), None);
    }

    #[test]
    fn test_sector_wildcard_matching() {
        // "all" as the request matches everything
        for sector in Sector::options() {
            assert!(Sector::All.matches(sector));
        }
        // "all" as the item sector matches every request
        for sector in Sector::options() {
            assert!(sector.matches(Sector::All));
        }
        // Concrete sectors match only themselves
        assert!(Sector::Food.matches(Sector::Food));
        assert!(!Sector::Food.matches(Sector::Textile));
    }

    #[test]
    fn test_update_uses_boundary_field_names() {
        let update = ComplianceUpdate {
            id: "gst-001".to_string(),
            title: "GST rate update".to_string(),
            url: "https://www.example.gov/gst".to_string(),
            updated_at: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
            tags: vec!["GST".to_string()],
            summary: "Revised.".to_string(),
            sector: Sector::Textile,
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["updatedAt"], "2025-08-20");
        assert_eq!(json["sector"], "textile");
    }

    #[test]
    fn test_unknown_severity_falls_back() {
        let alert: Alert = serde_json::from_value(serde_json::json!({
            "id": "a9",
            "title": "Misc",
            "due": "2025-09-30",
            "severity": "critical",
            "action": "Review"
        }))
        .unwrap();
        assert_eq!(alert.severity, Severity::Unknown);
    }

    #[test]
    fn test_default_profile() {
        let profile = Profile::default();
        assert_eq!(profile.name, "Acme MSME");
        assert_eq!(profile.state, "Gujarat");
        assert_eq!(profile.employees, 18);
        assert_eq!(profile.sector, Sector::All);
    }

    #[test]
    fn test_chat_message_ids_are_unique() {
        let a = ChatMessage::user("hi");
        let b = ChatMessage::user("hi");
        assert_ne!(a.id, b.id);
        assert!(matches!(a.sender, Sender::User));
    }

    #[test]
    fn export_types() {
        // Export all types to TypeScript
        // The export_to attribute in each type's #[ts] macro specifies the output file
        let config = Config::default();
        Sector::export(&config).unwrap();
        ComplianceUpdate::export(&config).unwrap();
        Severity::export(&config).unwrap();
        Alert::export(&config).unwrap();
        ChecklistItem::export(&config).unwrap();
        Profile::export(&config).unwrap();
        FetchPhase::export(&config).unwrap();
        ChatMessage::export(&config).unwrap();
        Sender::export(&config).unwrap();
    }
}
