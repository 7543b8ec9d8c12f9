//! Controller for the hero slides admin screen.
//!
//! Holds the slide list loader, the create/edit modal and the set of
//! thumbnails that failed to load, and turns operator actions (open, edit,
//! submit, delete, move) into mutations. Rendering is left to the caller:
//! [`HeroSlidesScreen::list_view`] and [`HeroSlidesScreen::modal`] describe
//! what to draw.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::broadcast;

use heroslides_core::error::CoreError;
use heroslides_core::form::{FormMode, SlideForm, Submission};
use heroslides_core::hero_slide::{plan_move, HeroSlide, MoveDirection, ENTITY_NAME};
use heroslides_core::messages;
use heroslides_core::notification::{FailureKind, Notification};
use heroslides_core::types::DbId;

use crate::backend::SlideBackend;
use crate::config::ClientConfig;
use crate::mutations::{MutationError, SlideMutations};
use crate::notifier::Notifier;
use crate::store::{QueryState, SlideLoader};

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// One table row.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideRow {
    pub id: DbId,
    pub display_order: i32,
    /// The slide image, or the fallback when it is missing or broken.
    pub thumbnail_url: String,
    pub thumbnail_alt: String,
    pub title: String,
    pub status_label: &'static str,
    pub is_active: bool,
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading { text: &'static str },
    Failed { message: String },
    Table {
        headers: [&'static str; 5],
        rows: Vec<SlideRow>,
        /// A refetch is in flight; rows may be stale.
        refreshing: bool,
        /// The last refetch failed; rows are from before it.
        error: Option<String>,
    },
}

/// The open create/edit modal.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideModal {
    form: SlideForm,
    error: Option<String>,
}

impl SlideModal {
    fn new(form: SlideForm) -> Self {
        Self { form, error: None }
    }

    pub fn form(&self) -> &SlideForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SlideForm {
        &mut self.form
    }

    /// Message of the last failed submit, shown inside the modal.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn heading(&self) -> &'static str {
        self.form.heading()
    }

    pub fn submit_label(&self) -> &'static str {
        self.form.submit_label()
    }

    pub fn cancel_label(&self) -> &'static str {
        messages::CANCEL_LABEL
    }
}

/// Result of a delete request that went through the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The operator declined the prompt; nothing was sent.
    Cancelled,
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// The hero slides admin screen.
pub struct HeroSlidesScreen<B> {
    loader: SlideLoader<B>,
    mutations: SlideMutations<B>,
    notifier: Arc<Notifier>,
    modal: Option<SlideModal>,
    /// `(id, image_url)` pairs reported as failing to load.
    broken_images: HashSet<(DbId, String)>,
    fallback_image_url: String,
}

impl<B: SlideBackend> HeroSlidesScreen<B> {
    pub fn new(backend: B, config: &ClientConfig) -> Self {
        Self::with_notifier(Arc::new(backend), Arc::new(Notifier::default()), config)
    }

    /// Build a screen sharing a backend and notifier with other components.
    pub fn with_notifier(backend: Arc<B>, notifier: Arc<Notifier>, config: &ClientConfig) -> Self {
        Self {
            loader: SlideLoader::new(Arc::clone(&backend)),
            mutations: SlideMutations::new(backend, Arc::clone(&notifier)),
            notifier,
            modal: None,
            broken_images: HashSet::new(),
            fallback_image_url: config.fallback_image_url.clone(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    /// Load the slide list when the screen is shown.
    pub async fn mount(&mut self) {
        self.loader.load().await;
    }

    /// Force a refetch of the slide list.
    pub async fn refresh(&mut self) {
        self.loader.refetch().await;
        self.forget_stale_images();
    }

    /// Slides in server order.
    pub fn slides(&self) -> &[HeroSlide] {
        self.loader.slides()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    // -- list ----------------------------------------------------------------

    pub fn list_view(&self) -> ListView {
        match self.loader.state() {
            QueryState::Idle | QueryState::Loading => ListView::Loading {
                text: messages::LOADING_TEXT,
            },
            QueryState::Failed {
                message,
                previous: None,
                ..
            } => ListView::Failed {
                message: format!("{}: {message}", messages::LOAD_FAILED_TEXT),
            },
            QueryState::Failed {
                message,
                previous: Some(_),
                ..
            } => ListView::Table {
                headers: messages::TABLE_HEADERS,
                rows: self.rows(),
                refreshing: false,
                error: Some(message),
            },
            QueryState::Loaded { fetching, .. } => ListView::Table {
                headers: messages::TABLE_HEADERS,
                rows: self.rows(),
                refreshing: fetching,
                error: None,
            },
        }
    }

    /// One row per slide, in server order.
    pub fn rows(&self) -> Vec<SlideRow> {
        self.slides().iter().map(|s| self.row(s)).collect()
    }

    fn row(&self, slide: &HeroSlide) -> SlideRow {
        let thumbnail_url =
            if slide.image_url.trim().is_empty() || self.is_image_broken(slide) {
                self.fallback_image_url.clone()
            } else {
                slide.image_url.clone()
            };
        let status_label = if slide.is_active {
            messages::STATUS_ACTIVE
        } else {
            messages::STATUS_INACTIVE
        };

        SlideRow {
            id: slide.id,
            display_order: slide.display_order,
            thumbnail_url,
            thumbnail_alt: slide.title.clone(),
            title: slide.title.clone(),
            status_label,
            is_active: slide.is_active,
        }
    }

    /// Record that a slide's current image failed to load so its row shows
    /// the fallback image instead. A later change of `image_url` clears it.
    pub fn image_failed(&mut self, id: DbId) {
        if let Some(slide) = self.slides().iter().find(|s| s.id == id) {
            let key = (slide.id, slide.image_url.clone());
            self.broken_images.insert(key);
        }
    }

    fn is_image_broken(&self, slide: &HeroSlide) -> bool {
        self.broken_images
            .contains(&(slide.id, slide.image_url.clone()))
    }

    /// Drop failures for slides that are gone or whose image changed.
    fn forget_stale_images(&mut self) {
        if self.broken_images.is_empty() {
            return;
        }
        let current: HashSet<(DbId, String)> = self
            .slides()
            .iter()
            .map(|s| (s.id, s.image_url.clone()))
            .collect();
        self.broken_images.retain(|key| current.contains(key));
    }

    // -- modal ---------------------------------------------------------------

    pub fn modal(&self) -> Option<&SlideModal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut SlideModal> {
        self.modal.as_mut()
    }

    /// Shortcut to the open form.
    pub fn form_mut(&mut self) -> Option<&mut SlideForm> {
        self.modal.as_mut().map(SlideModal::form_mut)
    }

    /// Open a blank modal for a new slide.
    pub fn open_create(&mut self) {
        self.modal = Some(SlideModal::new(SlideForm::create()));
    }

    /// Open the modal pre-filled from slide `id`.
    pub fn open_edit(&mut self, id: DbId) -> Result<(), CoreError> {
        let slide = self
            .slides()
            .iter()
            .find(|s| s.id == id)
            .ok_or(CoreError::NotFound {
                entity: ENTITY_NAME,
                id,
            })?;
        self.modal = Some(SlideModal::new(SlideForm::edit(slide)));
        Ok(())
    }

    /// Close the modal, dropping whatever was typed.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Validate the open form and dispatch it as a create or update.
    ///
    /// On success the modal closes and the list is refetched. On failure
    /// the modal stays open with its input and shows the error.
    pub async fn submit(&mut self) -> Result<HeroSlide, MutationError> {
        let Some(modal) = self.modal.as_ref() else {
            return Err(MutationError::new(
                FailureKind::Validation,
                messages::NO_OPEN_FORM,
            ));
        };

        let result = match modal.form.submit() {
            Err(e) => {
                let title = match modal.form.mode() {
                    FormMode::Create => messages::CREATE_FAILED,
                    FormMode::Edit(_) => messages::UPDATE_FAILED,
                };
                Err(self.mutations.reject(title, MutationError::from(e)))
            }
            Ok(Submission::Create(payload)) => {
                self.mutations.create(&mut self.loader, &payload).await
            }
            Ok(Submission::Update { id, payload }) => {
                self.mutations.update(&mut self.loader, id, &payload).await
            }
        };

        match result {
            Ok(slide) => {
                self.modal = None;
                self.forget_stale_images();
                Ok(slide)
            }
            Err(err) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.error = Some(err.message.clone());
                }
                Err(err)
            }
        }
    }

    // -- row actions ---------------------------------------------------------

    /// Delete slide `id` once `confirm` accepts the prompt.
    ///
    /// `confirm` receives the prompt text; returning `false` cancels
    /// without sending anything.
    pub async fn delete<F>(&mut self, id: DbId, confirm: F) -> Result<DeleteOutcome, MutationError>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(messages::DELETE_CONFIRM_PROMPT) {
            tracing::debug!(slide_id = id, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }
        self.mutations.delete(&mut self.loader, id).await?;
        self.forget_stale_images();
        Ok(DeleteOutcome::Deleted)
    }

    /// Move slide `id` one step up or down in display order.
    pub async fn move_slide(
        &mut self,
        id: DbId,
        direction: MoveDirection,
    ) -> Result<(), MutationError> {
        let moves = plan_move(self.slides(), id, direction);
        let result = self.mutations.reorder(&mut self.loader, &moves).await;
        self.forget_stale_images();
        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
