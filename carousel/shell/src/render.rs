//! Plain-text rendering of snapshots

use std::fmt::Write;

use carousel_core::{CarouselSnapshot, NotifyKind};

/// Render a snapshot as a block of text
pub fn render_snapshot(snapshot: &CarouselSnapshot) -> String {
    let mut out = String::new();
    let (w, h) = snapshot.format.aspect_ratio();

    let _ = write!(
        out,
        "== carousel ({} {w}:{h}) | tone: {} {}",
        snapshot.format,
        snapshot.tone,
        snapshot.tone.emoji()
    );
    if !snapshot.topic.trim().is_empty() {
        let _ = write!(out, " | topic: {}", snapshot.topic.trim());
    }
    if snapshot.is_generating {
        out.push_str(" | generating...");
    }
    out.push('\n');

    for (i, slide) in snapshot.slides.iter().enumerate() {
        let marker = if i == snapshot.active_index { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {}. {} {}  [{}]",
            i + 1,
            slide.emoji,
            slide.title,
            slide.background.as_str()
        );
        for line in slide.content.lines() {
            let _ = writeln!(out, "      {line}");
        }
    }

    if let Some(ref notification) = snapshot.notification {
        let icon = match notification.kind {
            NotifyKind::Success => "ok",
            NotifyKind::Error => "!!",
        };
        let _ = writeln!(out, "[{icon}] {}", notification.message);
    }

    out
}
