mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use tokio::sync::Barrier;

use common::*;
use yuletree_client::config_manager::TreeConfigManager;
use yuletree_core::assets::AssetCategory;
use yuletree_core::error::{CoreError, Notice};
use yuletree_core::routing::TreeTarget;
use yuletree_core::tree_config::{ResolvedTreeConfiguration, TreeConfiguration};

fn manager(backend: &FakeBackend) -> TreeConfigManager {
    TreeConfigManager::new(Arc::new(backend.clone()), resolver(backend))
}

fn backend_with_assets() -> FakeBackend {
    FakeBackend::signed_in(7, "rudolph")
        .with_asset(AssetCategory::Background, "snow.png", 11)
        .with_asset(AssetCategory::Tree, "pine.png", 22)
        .with_asset(AssetCategory::Point, "star.png", 33)
}

// -- save --

#[tokio::test]
async fn save_resolves_all_ids_then_writes_once() {
    let backend = backend_with_assets();
    let resolved = manager(&backend)
        .save(&session(), &complete_config())
        .await
        .unwrap();

    let expected = ResolvedTreeConfiguration {
        background: 11,
        tree: 22,
        tree_point: 33,
    };
    assert_eq!(resolved, expected);
    assert_eq!(backend.state().saved, vec![expected]);

    let calls = backend.calls();
    assert_eq!(calls.iter().filter(|c| *c == "lookup_asset").count(), 3);
    assert_eq!(calls.last().map(String::as_str), Some("save_tree"));
}

#[tokio::test]
async fn save_runs_the_three_lookups_concurrently() {
    let backend = backend_with_assets();
    // Each lookup blocks until all three are in flight at once.
    backend.state().lookup_barrier = Some(Arc::new(Barrier::new(3)));

    let saved = tokio::time::timeout(
        Duration::from_secs(5),
        manager(&backend).save(&session(), &complete_config()),
    )
    .await
    .expect("lookups were not issued concurrently");

    assert_eq!(saved.unwrap().tree_point, 33);
    assert_eq!(backend.state().saved.len(), 1);
}

#[tokio::test]
async fn failed_lookup_writes_nothing() {
    let backend = FakeBackend::signed_in(7, "rudolph")
        .with_asset(AssetCategory::Background, "snow.png", 11)
        .with_asset(AssetCategory::Tree, "pine.png", 22);

    let err = manager(&backend)
        .save(&session(), &complete_config())
        .await
        .unwrap_err();

    assert_matches!(
        err,
        CoreError::Resolution { ref name, category: AssetCategory::Point, .. } if name == "star.png"
    );
    assert_matches!(err.notice(), Notice::Alert(_));
    assert!(backend.state().saved.is_empty());
    assert!(!backend.calls().contains(&"save_tree".to_string()));
}

#[tokio::test]
async fn incomplete_configuration_is_rejected_before_any_request() {
    let backend = backend_with_assets();
    let config = TreeConfiguration {
        point: None,
        ..complete_config()
    };

    let err = manager(&backend).save(&session(), &config).await.unwrap_err();

    assert_matches!(err, CoreError::Validation(_));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn backend_write_failure_is_persistence_error() {
    let backend = backend_with_assets();
    backend.state().fail_save = true;

    let err = manager(&backend)
        .save(&session(), &complete_config())
        .await
        .unwrap_err();

    assert_matches!(err, CoreError::Persistence(_));
}

#[tokio::test]
async fn invalidated_session_requires_auth() {
    let backend = backend_with_assets();
    let mut session = session();
    session.invalidate();

    let err = manager(&backend)
        .save(&session, &complete_config())
        .await
        .unwrap_err();

    assert!(err.is_auth());
    assert!(backend.state().saved.is_empty());
}

// -- load --

#[tokio::test]
async fn load_configuration_reports_incomplete_tree() {
    let backend = FakeBackend::signed_in(7, "rudolph").with_tree(
        7,
        tree_view(
            TreeConfiguration::from_positional(&[Some("snow.png"), Some("pine.png"), None]),
            Vec::new(),
            None,
        ),
    );

    let config = manager(&backend)
        .load_configuration(&session(), TreeTarget::Mine)
        .await
        .unwrap();

    assert!(!TreeConfigManager::is_complete(&config));
    assert_eq!(config.missing_layers(), vec![AssetCategory::Point]);
}

#[tokio::test]
async fn picker_starts_from_saved_selection() {
    let backend = backend_with_assets()
        .with_tree(7, tree_view(complete_config(), Vec::new(), Some("rudolph")))
        .with_catalog(AssetCategory::Tree, &["pine.png", "fir.png"])
        .with_catalog(AssetCategory::Background, &["snow.png"])
        .with_catalog(AssetCategory::Point, &["star.png", "bell.png"]);

    let picker = manager(&backend).load_picker(&session()).await.unwrap();

    assert_eq!(picker.profile.id, 7);
    assert_eq!(picker.draft.active_tab(), AssetCategory::Tree);
    assert!(picker.draft.is_selected(AssetCategory::Tree, "pine.png"));
    assert_eq!(picker.options(AssetCategory::Point), ["star.png", "bell.png"]);
    assert!(picker.options(AssetCategory::Decoration).is_empty());
    assert_eq!(backend.calls()[0], "current_user");
}

#[tokio::test]
async fn picker_requires_signed_in_user() {
    let backend = FakeBackend::new();
    let err = manager(&backend).load_picker(&session()).await.unwrap_err();
    assert_matches!(err, CoreError::AuthRequired);
}
