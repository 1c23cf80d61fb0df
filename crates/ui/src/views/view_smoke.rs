use companion_core::model::{MODULES, storage_key};
use companion_core::time::fixed_now;
use storage::repository::{InMemoryRepository, StateEntry, StateRepository};

use super::test_harness::{setup_view_harness, setup_view_harness_with_repo};

async fn seeded_repo(json: &str) -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    repo.put_entry(&StateEntry::new(storage_key(), json, fixed_now()))
        .await
        .expect("seed state");
    repo
}

#[tokio::test(flavor = "current_thread")]
async fn landing_smoke_renders_fresh_state() {
    let mut harness = setup_view_harness().await;
    harness.rebuild();
    let html = harness.render();

    for expected in [
        "Fortschritt: 0%",
        "0% abgeschlossen",
        "⬜ 1) Uncanny Valley",
        "⬜ 5) Synthese: Was ist ein Mensch?",
        "offen",
        "Direktlink kopieren",
        "dl=1",
        "Export als JSON",
        "assets/docs/uncanny_valley.pdf",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("Dashboard ✓"), "unexpected check in {html}");
    assert!(!html.contains("Speichern fehlgeschlagen"), "unexpected error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn landing_smoke_rehydrates_persisted_state() {
    let repo = seeded_repo(
        r#"{"done":{"m1":true,"m3":true},"notes":{"m2":"Vertrauen ist zentral"},"answers":{"m4_q1":"uns selbst"}}"#,
    )
    .await;
    let mut harness = setup_view_harness_with_repo(repo).await;
    harness.rebuild();
    let html = harness.render();

    for expected in [
        "Fortschritt: 40%",
        "40% abgeschlossen",
        "✅ 1) Uncanny Valley",
        "⬜ 2) Akzeptanzlücke",
        "✅ 3) Video ARTE (Dropbox)",
        "abgeschlossen",
        "Vertrauen ist zentral",
        "uns selbst",
        "Letztes Speichern:",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn sidebar_marks_dashboard_when_everything_is_done() {
    let repo = seeded_repo(r#"{"done":{"m1":1,"m2":"ja","m3":true,"m4":[0],"m5":{}}}"#).await;
    let mut harness = setup_view_harness_with_repo(repo).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Dashboard ✓"), "missing check in {html}");
    assert!(html.contains("Fortschritt: 100%"), "missing 100% in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn landing_follows_controller_changes() {
    let mut harness = setup_view_harness().await;
    harness.rebuild();
    assert!(harness.render().contains("Fortschritt: 0%"));

    harness
        .companion
        .on_toggle_done(MODULES[1].id, true)
        .await
        .expect("toggle");
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Fortschritt: 20%"), "missing update in {html}");
    assert!(html.contains("✅ 2) Akzeptanzlücke"), "missing mark in {html}");
    assert_eq!(harness.repo.write_count(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_save_is_shown_on_dashboard() {
    let mut harness = setup_view_harness_with_repo(InMemoryRepository::with_quota(16)).await;
    harness.rebuild();

    let result = harness.companion.on_toggle_done("m1", true).await;
    assert!(result.is_err());
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Speichern fehlgeschlagen"), "missing error in {html}");
}
