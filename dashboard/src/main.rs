use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use ractor::Actor;

use dashboard::actors::panel::{self, AlertsFetch, PanelActor, PanelArguments, UpdatesFetch};
use dashboard::actors::profile::{self, DraftField};
use dashboard::actors::{
    assistant, checklist, filter, toast, AssistantActor, AssistantArguments, CannedScript,
    ChecklistActor, ChecklistArguments, FilterActor, FilterArguments, ProfileEditorActor,
    ProfileEditorArguments, ToastActor,
};
use dashboard::config::Config;
use dashboard::datasource::{MockChecklistSource, MockDataSource, MockLatency};
use shared_types::{Profile, Sector};

/// Headless walkthrough of the dashboard core: spawn the actor graph
/// against the mock backend, then drive the same session a user would -
/// initial loads, a sector switch, a checklist toggle, a profile save, and
/// one assistant question.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::info!(?config, "Starting MSME compliance dashboard demo");

    let source = Arc::new(MockDataSource::new(MockLatency::from(&config)));
    let profile = Profile::default();

    // Settle time for one simulated fetch round
    let settle = config.updates_latency + Duration::from_millis(200);

    let (toast_ref, _toast_handle) = Actor::spawn(None, ToastActor, ())
        .await
        .expect("Failed to spawn toast actor");

    let (alerts_panel, _alerts_handle) = Actor::spawn(
        None,
        PanelActor::<AlertsFetch>::default(),
        PanelArguments {
            name: "alerts",
            fetch: Arc::new(AlertsFetch {
                source: source.clone(),
            }),
            sector: Sector::All,
            since: None,
        },
    )
    .await
    .expect("Failed to spawn alerts panel");

    let (updates_panel, _updates_handle) = Actor::spawn(
        None,
        PanelActor::<UpdatesFetch>::default(),
        PanelArguments {
            name: "updates",
            fetch: Arc::new(UpdatesFetch {
                source: source.clone(),
            }),
            sector: profile.sector,
            since: NaiveDate::from_ymd_opt(2025, 8, 1),
        },
    )
    .await
    .expect("Failed to spawn updates panel");

    let (checklist_ref, _checklist_handle) = Actor::spawn(
        None,
        ChecklistActor,
        ChecklistArguments {
            source: Arc::new(MockChecklistSource),
            sector: profile.sector,
        },
    )
    .await
    .expect("Failed to spawn checklist actor");

    let (filter_ref, _filter_handle) = Actor::spawn(
        None,
        FilterActor,
        FilterArguments {
            profile_sector: profile.sector,
            updates_panel: Some(updates_panel.clone()),
            checklist: Some(checklist_ref.clone()),
        },
    )
    .await
    .expect("Failed to spawn filter actor");

    let (editor, _editor_handle) = Actor::spawn(
        None,
        ProfileEditorActor,
        ProfileEditorArguments {
            source: source.clone(),
            profile,
            filter: Some(filter_ref.clone()),
            toast: Some(toast_ref.clone()),
            toast_duration: config.toast_duration,
        },
    )
    .await
    .expect("Failed to spawn profile editor");

    let (assistant_ref, _assistant_handle) = Actor::spawn(
        None,
        AssistantActor,
        AssistantArguments {
            script: Arc::new(CannedScript {
                latency: config.assistant_latency,
            }),
        },
    )
    .await
    .expect("Failed to spawn assistant actor");

    // Initial loads for the default "all" profile
    tokio::time::sleep(settle).await;
    log_panels(&updates_panel, &alerts_panel).await;

    // The user narrows the feed to their kitchen business
    tracing::info!("Selecting the food sector");
    filter::set_selected(&filter_ref, Sector::Food).expect("filter cast failed");
    tokio::time::sleep(settle).await;
    log_panels(&updates_panel, &alerts_panel).await;
    log_checklist(&checklist_ref).await;

    // Tick off the FSSAI license row
    let done = checklist::toggle(&checklist_ref, "c1")
        .await
        .expect("checklist rpc failed")
        .expect("c1 should exist for the food sector");
    tracing::info!(item = "c1", done, "Checklist item toggled");

    // Update and save the profile; the toast and the filter both react
    tracing::info!("Saving an updated profile");
    profile::edit_draft(&editor, DraftField::Name("Weave Works".to_string()))
        .expect("editor cast failed");
    profile::edit_draft(&editor, DraftField::Sector(Sector::Textile)).expect("editor cast failed");
    profile::save(&editor)
        .await
        .expect("editor rpc failed")
        .expect("save should be accepted");
    tokio::time::sleep(config.save_latency + Duration::from_millis(100)).await;

    if let Some(message) = toast::current(&toast_ref).await.expect("toast rpc failed") {
        tracing::info!(%message, "Toast visible");
    }

    // Food is still explicitly selected, so the new profile sector is
    // masked until the selection returns to "all"
    tracing::info!("Selecting all sectors; the profile sector shows through");
    filter::set_selected(&filter_ref, Sector::All).expect("filter cast failed");
    tokio::time::sleep(settle).await;
    let effective = filter::effective(&filter_ref).await.expect("filter rpc failed");
    tracing::info!(%effective, "Effective sector after save");
    log_panels(&updates_panel, &alerts_panel).await;

    // Back to food: the earlier toggle is still there
    filter::set_selected(&filter_ref, Sector::Food).expect("filter cast failed");
    tokio::time::sleep(settle).await;
    log_checklist(&checklist_ref).await;

    // One scripted assistant exchange
    let answer = assistant::ask(&assistant_ref, "What licenses do I need for my kitchen?")
        .await
        .expect("assistant rpc failed")
        .expect("scripted reply should succeed");
    tracing::info!(answer = %answer.text, "Assistant replied");

    tracing::info!("Demo session complete");

    assistant_ref.stop(None);
    editor.stop(None);
    filter_ref.stop(None);
    checklist_ref.stop(None);
    updates_panel.stop(None);
    alerts_panel.stop(None);
    toast_ref.stop(None);

    Ok(())
}

async fn log_panels(
    updates: &ractor::ActorRef<panel::UpdatesPanelMsg>,
    alerts: &ractor::ActorRef<panel::AlertsPanelMsg>,
) {
    let snap = panel::snapshot(updates).await.expect("updates rpc failed");
    tracing::info!(
        phase = ?snap.phase,
        sector = %snap.sector,
        count = snap.items.len(),
        ids = ?snap.items.iter().map(|u| u.id.as_str()).collect::<Vec<_>>(),
        "Updates panel"
    );

    let snap = panel::snapshot(alerts).await.expect("alerts rpc failed");
    tracing::info!(
        phase = ?snap.phase,
        count = snap.items.len(),
        "Alerts panel"
    );
}

async fn log_checklist(checklist: &ractor::ActorRef<checklist::ChecklistMsg>) {
    let items = checklist::items(checklist).await.expect("checklist rpc failed");
    for item in &items {
        tracing::info!(id = %item.id, done = item.done, text = %item.item, "Checklist row");
    }
}
