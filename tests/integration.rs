// SPDX-License-Identifier: MPL-2.0
use iced_toasts::config::{self, Config, DurationsConfig, ToastsConfig};
use iced_toasts::error::Error;
use iced_toasts::ui::notifications::{
    HostMessage, PendingOperation, Position, PromiseMessages, Toast, ToastConfig, ToastHost,
    ToastId, ToastManager, ToastOptions, Variant,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

fn manager() -> ToastManager {
    ToastManager::new(ToastConfig::default()).expect("test runs inside a runtime")
}

async fn advance(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

#[tokio::test(start_paused = true)]
async fn test_toast_lifecycle_from_show_to_removal() {
    let manager = manager();
    let id = manager
        .show(
            ToastOptions::success("Image saved")
                .description("photo.png")
                .position(Position::BottomCenter),
        )
        .expect("show succeeds")
        .id();

    let toast = manager.get(id).expect("toast is active");
    assert_eq!(toast.title(), "Image saved");
    assert_eq!(toast.description(), Some("photo.png"));
    assert_eq!(toast.position(), Position::BottomCenter);

    // Success toasts auto-dismiss after 3 s, then linger for the grace period.
    advance(3_001).await;
    assert!(manager.get(id).expect("still in grace period").is_exiting());

    advance(150).await;
    assert!(manager.get(id).is_none());
    assert!(manager.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_ids_stay_unique_across_removals() {
    let manager = manager();
    let mut seen: Vec<ToastId> = Vec::new();
    for n in 0..10 {
        let id = manager.info(format!("toast {n}")).unwrap().id();
        if n % 3 == 0 {
            manager.remove(id);
        }
        assert!(!seen.contains(&id));
        seen.push(id);
    }
    assert_eq!(manager.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_subscriber_receives_one_delivery_per_change() {
    let manager = manager();
    let deliveries: Arc<Mutex<Vec<Vec<Toast>>>> = Arc::default();
    let sink = Arc::clone(&deliveries);
    let guard = manager.subscribe(move |toasts| sink.lock().unwrap().push(toasts.to_vec()));

    let id = manager.warning("Low disk space").unwrap().id();
    {
        let deliveries = deliveries.lock().unwrap();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].len(), 1);
        assert_eq!(deliveries[0][0].id(), id);
    }

    guard.unsubscribe();
    manager.info("after unsubscribe").unwrap();
    assert_eq!(deliveries.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_promise_toast_updates_in_place() {
    let manager = manager();
    let operation = PendingOperation::new(
        async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok::<_, std::io::Error>(42)
        },
        PromiseMessages::new("Uploading", "Uploaded", "Upload failed"),
    );

    let handle = manager
        .show(ToastOptions::promise(operation).description("holiday.png"))
        .unwrap();
    let id = handle.id();
    assert!(handle.is_bound());

    let loading = manager.get(id).unwrap();
    assert_eq!(loading.variant(), Variant::Loading);
    assert_eq!(loading.title(), "Uploading");

    assert_eq!(handle.settled().await, id);

    let settled = manager.get(id).unwrap();
    assert_eq!(settled.variant(), Variant::Success);
    assert_eq!(settled.title(), "Uploaded");
    assert_eq!(settled.description(), Some("holiday.png"));
    assert_eq!(manager.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_promise_uses_explicit_duration() {
    let manager = manager();
    let operation = PendingOperation::new(
        async { Err::<(), _>("timeout") },
        PromiseMessages::new("Connecting", "Connected", "Connection lost"),
    );

    let handle = manager
        .show(ToastOptions::promise(operation).duration(Duration::from_millis(800)))
        .unwrap();
    let id = handle.settled().await;

    let toast = manager.get(id).unwrap();
    assert_eq!(toast.variant(), Variant::Error);
    assert_eq!(toast.title(), "Connection lost");
    assert_eq!(toast.duration(), Duration::from_millis(800));

    advance(801).await;
    assert!(manager.get(id).unwrap().is_exiting());
}

#[tokio::test(start_paused = true)]
async fn test_host_tracks_manager_and_groups_by_position() {
    let manager = manager();
    let mut host = ToastHost::new(manager.clone());

    let top = manager.info("top").unwrap().id();
    let bottom = manager
        .show(ToastOptions::error("bottom").position(Position::BottomLeft))
        .unwrap()
        .id();
    let _ = host.update(HostMessage::Snapshot(manager.toasts()));

    let groups: Vec<(Position, Vec<ToastId>)> = host
        .groups()
        .into_iter()
        .map(|(position, toasts)| (position, toasts.into_iter().map(Toast::id).collect()))
        .collect();
    assert_eq!(
        groups,
        vec![
            (Position::TopRight, vec![top]),
            (Position::BottomLeft, vec![bottom]),
        ]
    );

    let _ = host.update(HostMessage::Dismiss(bottom));
    let _ = host.update(HostMessage::Snapshot(manager.toasts()));
    assert_eq!(host.pending_removals(), 1);

    let _ = host.update(HostMessage::Remove(bottom));
    assert!(manager.get(bottom).is_none());
    assert!(manager.get(top).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_config_file_drives_manager_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config = Config {
        toasts: ToastsConfig {
            position: Some(Position::BottomRight),
            grace_period_ms: Some(50),
            dismissible: Some(false),
        },
        durations: DurationsConfig {
            info_ms: Some(0),
            ..DurationsConfig::default()
        },
        ..Config::default()
    };
    config::save_with_override(&config, Some(dir.path().to_path_buf()))
        .expect("Failed to write config file");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(loaded, config);

    let manager = ToastManager::new(loaded.toast_config()).unwrap();
    let id = manager.info("persistent").unwrap().id();
    let toast = manager.get(id).unwrap();
    assert_eq!(toast.position(), Position::BottomRight);
    assert!(!toast.is_dismissible());

    advance(60_000).await;
    assert!(!manager.get(id).unwrap().is_exiting());

    manager.start_dismiss(id);
    advance(51).await;
    assert!(manager.get(id).is_none());

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_position_and_variant_parse_from_config_names() {
    assert_eq!("bottom-left".parse::<Position>(), Ok(Position::BottomLeft));
    assert_eq!("warning".parse::<Variant>(), Ok(Variant::Warning));
    assert_eq!(
        "sideways".parse::<Position>(),
        Err(Error::InvalidPosition("sideways".into()))
    );
}
