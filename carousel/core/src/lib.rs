//! Carousel Core - Headless Content State Manager for Carousel Studio
//!
//! This crate owns the state behind a carousel editor: an ordered list of
//! slides, the selected slide, a transient notification and the lifecycle of
//! an external content generation request. It has no rendering code and no
//! network transport; surfaces drive it with intents and render the
//! snapshots it sends back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Surfaces                               │
//! │  ┌──────────────┐  ┌──────────────┐  ┌───────────────────────┐  │
//! │  │ Shell (stdin)│  │   Web editor │  │  Headless / tests     │  │
//! │  └──────┬───────┘  └──────┬───────┘  └───────────┬───────────┘  │
//! │         └─────────────────┴──────────────────────┘              │
//! │                           │                                     │
//! │                  CarouselIntent (up)                            │
//! │                  CarouselSnapshot (down)                        │
//! └───────────────────────────┼─────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼─────────────────────────────────────┐
//! │                     CAROUSEL CORE                               │
//! │  ┌────────────────────────┴──────────────────────────────────┐  │
//! │  │                   CarouselManager                         │  │
//! │  │  ┌──────────┐  ┌───────────┐  ┌────────────┐  ┌─────────┐ │  │
//! │  │  │  Slide   │  │ Selection │  │Notification│  │Generation│ │  │
//! │  │  │  Store   │  │           │  │   Queue    │  │Controller│ │  │
//! │  │  └──────────┘  └───────────┘  └────────────┘  └────┬────┘ │  │
//! │  └──────────────────────────────────────────────────────┼────┘  │
//! └─────────────────────────────────────────────────────────┼───────┘
//!                                                           │
//!                          ContentGenerator / ClipboardSink (traits)
//! ```
//!
//! # Key Types
//!
//! - [`CarouselManager`]: Owns the state and processes intents
//! - [`CarouselIntent`]: Intents sent from surfaces to the manager
//! - [`CarouselSnapshot`]: Renderable state sent from the manager to surfaces
//! - [`SlideStore`]: The ordered, never-empty slide collection
//! - [`ContentGenerator`]: External service producing slide content
//! - [`ClipboardSink`]: Destination for exported text
//!
//! # Quick Start
//!
//! ```ignore
//! use carousel_core::{CarouselIntent, CarouselManager, load_config};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (snapshot_tx, mut snapshot_rx) = mpsc::channel(100);
//!     let (intent_tx, intent_rx) = mpsc::channel(100);
//!
//!     let manager = CarouselManager::new(my_generator, my_clipboard, load_config()?, snapshot_tx);
//!     tokio::spawn(manager.run(intent_rx));
//!
//!     intent_tx.send(CarouselIntent::SetTopic { topic: "Sleep".into() }).await?;
//!     intent_tx.send(CarouselIntent::Generate).await?;
//!
//!     while let Some(snapshot) = snapshot_rx.recv().await {
//!         // Render snapshot
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`backend`]: Content generator abstraction and payload validation
//! - [`clipboard`]: Plain-text export and the clipboard sink trait
//! - [`config`]: TOML/env configuration
//! - [`events`]: Intents from surfaces to the manager
//! - [`generation`]: Generation lifecycle and slide assembly
//! - [`manager`]: Main `CarouselManager` struct
//! - [`messages`]: Snapshots from the manager to surfaces
//! - [`notifications`]: Single-slot expiring notification
//! - [`selection`]: Active slide index
//! - [`slides`]: Slide model and store
//! - [`state`]: Slides plus selection, and the edit reducer

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod clipboard;
pub mod config;
pub mod events;
pub mod generation;
pub mod manager;
pub mod messages;
pub mod notifications;
pub mod selection;
pub mod slides;
pub mod state;

// Re-exports for convenience
pub use backend::{
    decode_payload, slides_from_payload, ContentGenerator, GeneratedSlide, GenerationError,
    GenerationRequest, Tone, UnknownTone, ValidationError,
};
pub use clipboard::{export_text, ClipboardError, ClipboardSink};
pub use events::CarouselIntent;
pub use generation::{
    build_slides, BeginResult, GenerationController, GenerationOutcome, GenerationPhase,
    RequestId,
};
pub use manager::CarouselManager;
pub use messages::{CarouselSnapshot, Format, UnknownFormat};
pub use notifications::{Notification, NotificationQueue, NotifyKind, DEFAULT_TTL};
pub use selection::ActiveSelection;
pub use slides::{
    BackgroundStyle, Slide, SlideField, SlideId, SlideStore, SlideTemplate, UnknownField,
};
pub use state::{reduce, CarouselState, SlideEdit};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, CarouselToml, ConfigError,
    ConfigOverrides, ConfigSource, ManagerConfig, DEFAULT_EMOJI, DEFAULT_PALETTE,
};
