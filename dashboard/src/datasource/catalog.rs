//! Canned records backing the mock backend.
//!
//! The content mirrors what the demo deployment serves: four feed updates
//! spread across sectors (one tagged `all`), three deadline alerts, and
//! per-sector checklist templates plus the general bucket every sector gets.

use chrono::NaiveDate;
use shared_types::{Alert, ChecklistItem, ComplianceUpdate, Sector, Severity};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid catalog date")
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

pub fn updates() -> Vec<ComplianceUpdate> {
    vec![
        ComplianceUpdate {
            id: "gst-001".to_string(),
            title: "GST rate update for fabric processing (example)".to_string(),
            url: "https://www.example.gov/gst/fabric-aug-update".to_string(),
            updated_at: date(2025, 8, 20),
            tags: tags(&["GST", "Textile"]),
            summary: "GST on certain fabric processing services revised. Effective Sept 01, \
                      2025. Compliance window: 30 days."
                .to_string(),
            sector: Sector::Textile,
        },
        ComplianceUpdate {
            id: "labour-017".to_string(),
            title: "Monthly wage register rule for >10 workers (example)".to_string(),
            url: "https://www.example.gov/labour/wage-register".to_string(),
            updated_at: date(2025, 8, 18),
            tags: tags(&["Labour", "HR"]),
            summary: "Establishments with more than 10 workers must maintain Form X wage \
                      register and digital attendance logs."
                .to_string(),
            sector: Sector::All,
        },
        ComplianceUpdate {
            id: "safety-009".to_string(),
            title: "Fire & Safety drill reporting for kitchens (example)".to_string(),
            url: "https://www.example.gov/safety/kitchen-drill".to_string(),
            updated_at: date(2025, 8, 15),
            tags: tags(&["Safety", "Processed Food"]),
            summary: "Commercial kitchens must record monthly safety drills and keep \
                      extinguisher service certificates updated."
                .to_string(),
            sector: Sector::Food,
        },
        ComplianceUpdate {
            id: "env-103".to_string(),
            title: "E-waste disposal norms for IT hardware (example)".to_string(),
            url: "https://www.example.gov/pollution/e-waste".to_string(),
            updated_at: date(2025, 8, 12),
            tags: tags(&["Environment", "IT"]),
            summary: "Updated e-waste collection and vendor certification requirements for \
                      MSMEs handling electronics."
                .to_string(),
            sector: Sector::It,
        },
    ]
}

pub fn alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "a1".to_string(),
            title: "GST Filing — GSTR-3B".to_string(),
            due: date(2025, 9, 20),
            severity: Severity::High,
            action: "Prepare & file via portal".to_string(),
        },
        Alert {
            id: "a2".to_string(),
            title: "Labour — PF Contribution".to_string(),
            due: date(2025, 9, 15),
            severity: Severity::Medium,
            action: "Generate challan & pay".to_string(),
        },
        Alert {
            id: "a3".to_string(),
            title: "Safety — Fire Drill Log".to_string(),
            due: date(2025, 9, 5),
            severity: Severity::Low,
            action: "Upload drill report".to_string(),
        },
    ]
}

fn item(id: &str, text: &str, done: bool) -> ChecklistItem {
    ChecklistItem {
        id: id.to_string(),
        item: text.to_string(),
        done,
    }
}

/// The sector-specific checklist template. Sectors without a dedicated
/// template (manufacturing, and the `all` wildcard) get an empty list.
pub fn checklist_for(sector: Sector) -> Vec<ChecklistItem> {
    match sector {
        Sector::Food => vec![
            item("c1", "FSSAI License valid/renewal date", false),
            item("c2", "Kitchen hygiene SOPs documented", true),
            item("c3", "Fire drill conducted this month", false),
        ],
        Sector::Textile => vec![
            item("c4", "GST category mapping verified", true),
            item("c5", "Worker safety training log", false),
        ],
        Sector::It => vec![
            item("c6", "Data protection policy updated", true),
            item("c7", "E-waste vendor certification", false),
        ],
        Sector::Manufacturing | Sector::All => Vec::new(),
    }
}

/// The general checklist bucket appended for every sector.
pub fn checklist_general() -> Vec<ChecklistItem> {
    vec![
        item("c8", "Udyam registration synced", true),
        item("c9", "Bank KYC & PAN validated", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_ids_are_unique() {
        let all = updates();
        let mut ids: Vec<_> = all.iter().map(|u| u.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_exactly_one_wildcard_update() {
        let wildcard = updates()
            .into_iter()
            .filter(|u| u.sector == Sector::All)
            .count();
        assert_eq!(wildcard, 1);
    }

    #[test]
    fn test_checklist_ids_do_not_overlap_across_sectors() {
        let mut ids = Vec::new();
        for sector in [Sector::Food, Sector::Textile, Sector::It] {
            ids.extend(checklist_for(sector).into_iter().map(|i| i.id));
        }
        ids.extend(checklist_general().into_iter().map(|i| i.id));
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
