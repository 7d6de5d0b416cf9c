//! Carousel Manager - The State Owner
//!
//! The manager owns the carousel state, the notification queue and the
//! generation lifecycle. It communicates through:
//! - `CarouselIntent`: what a surface asks for
//! - `CarouselSnapshot`: what a surface should render, sent after every change
//!
//! All mutation happens on the task that drives the manager. The generator
//! call and the clipboard write are the only operations that suspend; both run
//! in spawned tasks and report back over an internal channel, so intents keep
//! flowing while they are in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::backend::{
    slides_from_payload, ContentGenerator, GeneratedSlide, GenerationError, GenerationRequest,
    Tone,
};
use crate::clipboard::{export_text, ClipboardError, ClipboardSink};
use crate::config::ManagerConfig;
use crate::events::CarouselIntent;
use crate::generation::{build_slides, BeginResult, GenerationController, GenerationOutcome, RequestId};
use crate::messages::{CarouselSnapshot, Format};
use crate::notifications::{Notification, NotificationQueue, NotifyKind};
use crate::slides::SlideStore;
use crate::state::{CarouselState, SlideEdit};

/// User-facing notification texts
mod text {
    pub const EMPTY_TOPIC: &str = "Please enter a topic";
    pub const GENERATED: &str = "Carousel created!";
    pub const GENERATION_FAILED: &str = "Generation failed";
    pub const STYLE_APPLIED: &str = "Background applied to all slides";
    pub const COPIED: &str = "Text copied!";
    pub const COPY_FAILED: &str = "Copy failed";
}

/// Work finished outside the manager's task
#[derive(Debug)]
enum Completion {
    Generation {
        request_id: RequestId,
        outcome: GenerationOutcome,
    },
    Clipboard(Result<(), ClipboardError>),
}

/// The carousel content state manager
pub struct CarouselManager<G: ContentGenerator, C: ClipboardSink> {
    /// Configuration
    config: ManagerConfig,
    /// Content generator collaborator
    generator: Arc<G>,
    /// Clipboard collaborator
    clipboard: Arc<C>,
    /// Slides and selection
    state: CarouselState,
    /// Transient message slot
    notifications: NotificationQueue,
    /// Generation lifecycle
    generation: GenerationController,
    /// Generation inputs
    topic: String,
    tone: Tone,
    /// Presentation hint
    format: Format,
    /// Channel to send snapshots to the surface
    tx: mpsc::Sender<CarouselSnapshot>,
    /// Completions from spawned work
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<G, C> CarouselManager<G, C>
where
    G: ContentGenerator + 'static,
    C: ClipboardSink + 'static,
{
    /// Create a manager showing the starter carousel
    pub fn new(
        generator: G,
        clipboard: C,
        config: ManagerConfig,
        tx: mpsc::Sender<CarouselSnapshot>,
    ) -> Self {
        let store = SlideStore::starter(&config.palette);
        Self::with_store(generator, clipboard, config, store, tx)
    }

    /// Create a manager over an existing slide store
    pub fn with_store(
        generator: G,
        clipboard: C,
        config: ManagerConfig,
        store: SlideStore,
        tx: mpsc::Sender<CarouselSnapshot>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            state: CarouselState::new(store, config.template.clone()),
            notifications: NotificationQueue::new(config.notification_ttl),
            generation: GenerationController::new(),
            topic: String::new(),
            tone: Tone::default(),
            format: Format::default(),
            generator: Arc::new(generator),
            clipboard: Arc::new(clipboard),
            config,
            tx,
            completion_tx,
            completion_rx,
        }
    }

    /// Current carousel state
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Visible notification
    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    /// Whether a generation request is in flight
    pub fn is_generating(&self) -> bool {
        self.generation.is_pending()
    }

    /// Configuration in use
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Build a snapshot of the renderable state
    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            slides: self.state.slides().to_vec(),
            active_index: self.state.active_index(),
            format: self.format,
            topic: self.topic.clone(),
            tone: self.tone,
            is_generating: self.generation.is_pending(),
            notification: self.notifications.current().cloned(),
        }
    }

    /// Handle an intent from the surface
    pub async fn handle_intent(&mut self, intent: CarouselIntent) -> anyhow::Result<()> {
        tracing::trace!(intent = ?intent, "Handling intent");

        match intent {
            CarouselIntent::SetTopic { topic } => {
                self.topic = topic;
                self.publish().await;
            }
            CarouselIntent::SetTone { tone } => {
                self.tone = tone;
                self.publish().await;
            }
            CarouselIntent::SetFormat { format } => {
                self.format = format;
                self.publish().await;
            }
            CarouselIntent::Generate => {
                self.start_generation().await;
            }
            CarouselIntent::ExportText => {
                self.start_export();
            }
            CarouselIntent::DismissNotification => {
                if self.notifications.current().is_some() {
                    self.notifications.clear();
                    self.publish().await;
                }
            }
            edit_intent => {
                if let Some(edit) = edit_intent.as_edit() {
                    self.handle_edit(&edit).await;
                }
            }
        }

        Ok(())
    }

    /// Apply a synchronous edit
    ///
    /// Edits are accepted while a generation is pending; a later successful
    /// generation replaces whatever they changed.
    async fn handle_edit(&mut self, edit: &SlideEdit) {
        // A generation can shrink the carousel after the surface addressed a slide.
        if let SlideEdit::UpdateField { index, .. } = edit {
            let len = self.state.slides().len();
            if *index >= len {
                tracing::warn!(index, len, "Dropping field edit for a slide that no longer exists");
                return;
            }
        }

        let changed = self.state.apply(edit);

        if let SlideEdit::ApplyStyleToAll { style } = edit {
            tracing::debug!(style = style.as_str(), "Background applied to all slides");
            self.notify(NotifyKind::Success, text::STYLE_APPLIED).await;
        } else if changed {
            self.publish().await;
        }
    }

    /// Validate the inputs and start a generator call
    async fn start_generation(&mut self) {
        if self.generation.is_pending() {
            tracing::debug!("Generation already in flight, dropping request");
            return;
        }

        let request = match GenerationRequest::new(&self.topic, self.tone) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected generation request");
                self.notify(NotifyKind::Error, text::EMPTY_TOPIC).await;
                return;
            }
        };

        let (request_id, request) = match self.generation.begin(request, self.state.store().backgrounds()) {
            BeginResult::Started(id, request) => (id, request),
            BeginResult::Busy => return,
        };

        tracing::info!(
            generator = self.generator.name(),
            topic = request.topic(),
            tone = %request.tone(),
            request_id = request_id.0,
            "Starting generation"
        );

        let generator = Arc::clone(&self.generator);
        let completion_tx = self.completion_tx.clone();
        let timeout = self.config.generation_timeout;
        tokio::spawn(async move {
            let outcome = run_generator(generator.as_ref(), &request, timeout).await.into();
            // The manager may be gone; nothing to report to then.
            let _ = completion_tx.send(Completion::Generation {
                request_id,
                outcome,
            });
        });

        self.publish().await;
    }

    /// Render the carousel as text and hand it to the clipboard sink
    fn start_export(&self) {
        let text = export_text(self.state.slides());
        let clipboard = Arc::clone(&self.clipboard);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = clipboard.write_text(&text).await;
            let _ = completion_tx.send(Completion::Clipboard(result));
        });
    }

    /// Apply any finished background work
    ///
    /// Call this regularly when not using [`CarouselManager::run`].
    /// Returns true if there was activity.
    pub async fn poll_completions(&mut self) -> bool {
        let mut activity = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply_completion(completion).await;
            activity = true;
        }
        activity
    }

    /// Wait for the next piece of background work to finish and apply it
    pub async fn await_completion(&mut self) -> bool {
        match self.completion_rx.recv().await {
            Some(completion) => {
                self.apply_completion(completion).await;
                true
            }
            None => false,
        }
    }

    /// Clear the notification if it has expired
    ///
    /// Returns true if a notification was cleared.
    pub async fn poll_notifications(&mut self) -> bool {
        if self.notifications.expire(Instant::now()) {
            self.publish().await;
            true
        } else {
            false
        }
    }

    async fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Generation {
                request_id,
                outcome,
            } => self.finish_generation(request_id, outcome).await,
            Completion::Clipboard(Ok(())) => {
                self.notify(NotifyKind::Success, text::COPIED).await;
            }
            Completion::Clipboard(Err(e)) => {
                tracing::warn!(error = %e, "Clipboard write failed");
                self.notify(NotifyKind::Error, text::COPY_FAILED).await;
            }
        }
    }

    async fn finish_generation(&mut self, request_id: RequestId, outcome: GenerationOutcome) {
        let Some(prior_backgrounds) = self.generation.finish(request_id) else {
            tracing::debug!(request_id = request_id.0, "Ignoring stale generation result");
            return;
        };

        match outcome {
            GenerationOutcome::Succeeded(generated) => {
                let count = generated.len();
                let slides = build_slides(
                    generated,
                    &prior_backgrounds,
                    &self.config.palette,
                    &self.config.default_emoji,
                );
                if self.state.replace_slides(slides) {
                    tracing::info!(request_id = request_id.0, slides = count, "Generation succeeded");
                    self.notify(NotifyKind::Success, text::GENERATED).await;
                } else {
                    tracing::warn!(request_id = request_id.0, "Generator returned no slides");
                    self.notify(NotifyKind::Error, text::GENERATION_FAILED).await;
                }
            }
            GenerationOutcome::Failed(e) => {
                tracing::warn!(
                    generator = self.generator.name(),
                    request_id = request_id.0,
                    error = %e,
                    "Generation failed"
                );
                self.notify(NotifyKind::Error, text::GENERATION_FAILED).await;
            }
        }
    }

    /// Drive the manager until the intent channel closes
    ///
    /// Publishes an initial snapshot, then processes intents, background
    /// completions and notification expiry as they happen.
    pub async fn run(mut self, mut intents: mpsc::Receiver<CarouselIntent>) -> anyhow::Result<()> {
        self.publish().await;

        loop {
            let deadline = self.notifications.deadline();
            tokio::select! {
                maybe_intent = intents.recv() => {
                    match maybe_intent {
                        Some(intent) => self.handle_intent(intent).await?,
                        None => break,
                    }
                }
                Some(completion) = self.completion_rx.recv() => {
                    self.apply_completion(completion).await;
                }
                () = sleep_until(deadline) => {
                    self.poll_notifications().await;
                }
            }
        }

        tracing::debug!("Intent channel closed, manager stopping");
        Ok(())
    }

    /// Push a notification and publish
    async fn notify(&mut self, kind: NotifyKind, message: &str) {
        self.notifications.push(message, kind);
        self.publish().await;
    }

    /// Send a snapshot to the surface
    async fn publish(&self) {
        if let Err(e) = self.tx.send(self.snapshot()).await {
            tracing::warn!("Failed to send snapshot to surface: {}", e);
        }
    }
}

/// Call the generator, honoring an optional deadline, and validate its payload
async fn run_generator<G: ContentGenerator + ?Sized>(
    generator: &G,
    request: &GenerationRequest,
    timeout: Option<Duration>,
) -> Result<Vec<GeneratedSlide>, GenerationError> {
    let call = generator.generate(request);
    let payload = match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| GenerationError::Timeout(limit))??,
        None => call.await?,
    };
    slides_from_payload(payload)
}

/// Sleep until `deadline`, or forever if there is none
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
