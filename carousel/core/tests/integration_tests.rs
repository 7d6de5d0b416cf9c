//! Integration tests for the carousel manager
//!
//! These tests drive the public API the way a surface does: intents in,
//! snapshots out. Tests cover:
//! - Slide collection and selection invariants across edit sequences
//! - Generation through `run`, including carry-over of backgrounds
//! - Notification expiry on a paused clock
//! - TOML configuration reaching the manager

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::NamedTempFile;
use tokio::sync::mpsc;
use tokio::time::Instant;

use carousel_core::config::{load_config_from_path, ConfigOverrides, ConfigSource};
use carousel_core::{
    export_text, reduce, BackgroundStyle, CarouselIntent, CarouselManager, CarouselSnapshot,
    CarouselState, ClipboardError, ClipboardSink, ContentGenerator, GenerationError,
    GenerationRequest, ManagerConfig, NotifyKind, Slide, SlideEdit, SlideField, SlideStore,
    SlideTemplate,
};

// =============================================================================
// Test doubles
// =============================================================================

struct ScriptedGenerator {
    payload: serde_json::Value,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(!request.topic().trim().is_empty());
        Ok(self.payload.clone())
    }
}

struct NullClipboard;

#[async_trait]
impl ClipboardSink for NullClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Ok(())
    }
}

fn state_with_backgrounds(backgrounds: &[&str]) -> CarouselState {
    let slides = backgrounds
        .iter()
        .enumerate()
        .map(|(i, bg)| Slide::new(format!("Slide {i}"), "body", "⭐", BackgroundStyle::new(*bg)))
        .collect();
    CarouselState::new(SlideStore::new(slides).unwrap(), SlideTemplate::default())
}

fn assert_invariants(state: &CarouselState) {
    assert!(!state.slides().is_empty(), "collection must never be empty");
    assert!(
        state.active_index() < state.slides().len(),
        "active index {} out of range for {} slides",
        state.active_index(),
        state.slides().len()
    );
}

async fn next_snapshot(rx: &mut mpsc::Receiver<CarouselSnapshot>) -> CarouselSnapshot {
    rx.recv().await.expect("manager stopped publishing")
}

// =============================================================================
// Test 1: Collection and selection invariants
// =============================================================================

/// Test that no sequence of edits can empty the collection or push the
/// selection out of range.
#[test]
fn test_edit_sequences_preserve_invariants() {
    let edits = [
        SlideEdit::Select { index: 7 },
        SlideEdit::RemoveSlide { index: 2 },
        SlideEdit::RemoveSlide { index: 0 },
        SlideEdit::RemoveSlide { index: 0 },
        SlideEdit::RemoveSlide { index: 0 },
        SlideEdit::StepBackward,
        SlideEdit::AddSlide,
        SlideEdit::AddSlide,
        SlideEdit::StepForward,
        SlideEdit::StepForward,
        SlideEdit::RemoveSlide { index: 2 },
        SlideEdit::RemoveSlide { index: 99 },
        SlideEdit::ApplyStyleToAll {
            style: BackgroundStyle::new("Z"),
        },
        SlideEdit::Select { index: 0 },
        SlideEdit::RemoveSlide { index: 1 },
        SlideEdit::RemoveSlide { index: 0 },
    ];

    let mut state = state_with_backgrounds(&["A", "B", "C"]);
    for edit in &edits {
        state = reduce(state, edit);
        assert_invariants(&state);
    }
}

/// Test that removing the only slide changes nothing.
#[test]
fn test_last_slide_cannot_be_removed() {
    let state = state_with_backgrounds(&["A"]);
    let after = reduce(state.clone(), &SlideEdit::RemoveSlide { index: 0 });
    assert_eq!(after, state);
}

/// Test that removing a slide before the selection keeps it in range.
#[test]
fn test_remove_before_selection_shifts_selection() {
    let state = state_with_backgrounds(&["A", "B", "C"]);
    let state = reduce(state, &SlideEdit::Select { index: 2 });
    let state = reduce(state, &SlideEdit::RemoveSlide { index: 1 });
    assert_eq!(state.active_index(), 1);
    assert_eq!(state.slides().len(), 2);
}

/// Test that a new slide inherits the last background and the style
/// applier touches only backgrounds.
#[test]
fn test_add_slide_and_apply_style() {
    let state = state_with_backgrounds(&["A", "B"]);
    let state = reduce(state, &SlideEdit::AddSlide);
    assert_eq!(state.slides().len(), 3);
    assert_eq!(state.slides()[2].background, BackgroundStyle::new("B"));

    let titles: Vec<String> = state.slides().iter().map(|s| s.title.clone()).collect();
    let state = reduce(
        state,
        &SlideEdit::ApplyStyleToAll {
            style: BackgroundStyle::new("S"),
        },
    );
    assert!(state
        .slides()
        .iter()
        .all(|s| s.background == BackgroundStyle::new("S")));
    let titles_after: Vec<String> = state.slides().iter().map(|s| s.title.clone()).collect();
    assert_eq!(titles_after, titles);
}

/// Test that field edits reach only the addressed slide.
#[test]
fn test_update_field_targets_one_slide() {
    let state = state_with_backgrounds(&["A", "B"]);
    let state = reduce(
        state,
        &SlideEdit::UpdateField {
            index: 1,
            field: "bg".parse::<SlideField>().unwrap(),
            value: "Q".to_string(),
        },
    );
    assert_eq!(state.slides()[0].background, BackgroundStyle::new("A"));
    assert_eq!(state.slides()[1].background, BackgroundStyle::new("Q"));
}

// =============================================================================
// Test 2: Generation through the run loop
// =============================================================================

/// Test a full generate cycle through `run`: pending snapshot, replacement
/// with carried-over backgrounds, success notification.
#[tokio::test]
async fn test_generate_through_run_loop() {
    let calls = Arc::new(AtomicUsize::new(0));
    let generator = ScriptedGenerator {
        payload: json!([
            {"title": "Wake early", "content": "Same time daily", "emoji": "⏰"},
            {"title": "Move", "content": "Ten minutes", "emoji": "🏃"},
            {"title": "Read", "content": "One chapter", "emoji": ""},
        ]),
        calls: Arc::clone(&calls),
    };
    let config = ManagerConfig::default();
    let palette = config.palette.clone();
    let initial = SlideStore::new(vec![
        Slide::new("a", "a", "⭐", BackgroundStyle::new("A")),
        Slide::new("b", "b", "⭐", BackgroundStyle::new("B")),
    ])
    .unwrap();

    let (snapshot_tx, mut snapshot_rx) = mpsc::channel(100);
    let (intent_tx, intent_rx) = mpsc::channel(100);
    let manager =
        CarouselManager::with_store(generator, NullClipboard, config, initial, snapshot_tx);
    let handle = tokio::spawn(manager.run(intent_rx));

    let initial = next_snapshot(&mut snapshot_rx).await;
    assert_eq!(initial.slides.len(), 2);

    intent_tx
        .send(CarouselIntent::SetTopic {
            topic: "  morning habits ".to_string(),
        })
        .await
        .unwrap();
    intent_tx.send(CarouselIntent::Generate).await.unwrap();

    let mut saw_pending = false;
    let done = loop {
        let snapshot = next_snapshot(&mut snapshot_rx).await;
        saw_pending |= snapshot.is_generating;
        if snapshot.notification.is_some() {
            break snapshot;
        }
    };

    assert!(saw_pending);
    assert!(!done.is_generating);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let notification = done.notification.as_ref().unwrap();
    assert_eq!(notification.kind, NotifyKind::Success);
    assert_eq!(notification.message, "Carousel created!");

    let backgrounds: Vec<BackgroundStyle> =
        done.slides.iter().map(|s| s.background.clone()).collect();
    assert_eq!(
        backgrounds,
        vec![
            BackgroundStyle::new("A"),
            BackgroundStyle::new("B"),
            palette[2].clone()
        ]
    );
    assert_eq!(done.slides[2].emoji, "✨");
    assert_eq!(done.active_index, 0);
    assert_eq!(
        export_text(&done.slides[..1]),
        "1. Wake early ⏰\nSame time daily"
    );

    drop(intent_tx);
    handle.await.unwrap().unwrap();
}

// =============================================================================
// Test 3: Notification expiry
// =============================================================================

/// Test that `run` clears a notification once its TTL has elapsed and that a
/// replacing notification restarts the TTL.
#[tokio::test(start_paused = true)]
async fn test_notification_expires_in_run_loop() {
    let config = ManagerConfig {
        notification_ttl: Duration::from_millis(3000),
        ..ManagerConfig::default()
    };
    let (snapshot_tx, mut snapshot_rx) = mpsc::channel(100);
    let (intent_tx, intent_rx) = mpsc::channel(100);
    let manager = CarouselManager::new(
        ScriptedGenerator {
            payload: json!([]),
            calls: Arc::new(AtomicUsize::new(0)),
        },
        NullClipboard,
        config,
        snapshot_tx,
    );
    let handle = tokio::spawn(manager.run(intent_rx));
    next_snapshot(&mut snapshot_rx).await;

    let style = CarouselIntent::ApplyStyleToAll {
        style: BackgroundStyle::new("Z"),
    };
    intent_tx.send(style.clone()).await.unwrap();
    let shown = next_snapshot(&mut snapshot_rx).await;
    assert!(shown.notification.is_some());
    let first_shown_at = Instant::now();

    // Replace the notification two seconds in; the timer starts over.
    tokio::time::sleep(Duration::from_millis(2000)).await;
    intent_tx.send(CarouselIntent::Generate).await.unwrap();
    let replaced = next_snapshot(&mut snapshot_rx).await;
    assert_eq!(
        replaced.notification.as_ref().map(|n| n.kind),
        Some(NotifyKind::Error)
    );
    let replaced_at = Instant::now();

    let cleared = next_snapshot(&mut snapshot_rx).await;
    assert!(cleared.notification.is_none());
    assert!(replaced_at.elapsed() >= Duration::from_millis(3000));
    assert!(first_shown_at.elapsed() >= Duration::from_millis(5000));

    drop(intent_tx);
    handle.await.unwrap().unwrap();
}

// =============================================================================
// Test 4: Configuration reaches the manager
// =============================================================================

/// Test that a TOML file configures the placeholder template, palette and
/// TTL, and CLI overrides win.
#[tokio::test]
async fn test_toml_config_drives_manager() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[notifications]
ttl_ms = 1500

[slides]
placeholder_title = "Draft"
placeholder_emoji = "🧪"
palette = ["red", "green"]
"#
    )
    .unwrap();

    let mut config = load_config_from_path(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config.source(), ConfigSource::File);
    assert_eq!(config.notification_ttl, Duration::from_millis(1500));

    ConfigOverrides::new()
        .with_notification_ttl_ms(500)
        .apply(&mut config);
    assert_eq!(config.source(), ConfigSource::Cli);
    assert_eq!(config.notification_ttl, Duration::from_millis(500));

    let (snapshot_tx, _snapshot_rx) = mpsc::channel(100);
    let mut manager = CarouselManager::new(
        ScriptedGenerator {
            payload: json!([]),
            calls: Arc::new(AtomicUsize::new(0)),
        },
        NullClipboard,
        config,
        snapshot_tx,
    );

    let starter = manager.snapshot();
    assert_eq!(starter.slides[0].background, BackgroundStyle::new("red"));
    assert_eq!(starter.slides[1].background, BackgroundStyle::new("green"));

    manager.handle_intent(CarouselIntent::AddSlide).await.unwrap();
    let added = manager.state().slides().last().cloned().unwrap();
    assert_eq!(added.title, "Draft");
    assert_eq!(added.emoji, "🧪");
    assert_eq!(added.background, BackgroundStyle::new("green"));
}
