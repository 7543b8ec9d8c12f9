//! Create, update, delete and reorder dispatchers.
//!
//! Each successful write invalidates the slide list (which refetches it in
//! full) and publishes a confirmation. Each failure publishes an error
//! notification and comes back as a [`MutationError`] carrying the message
//! shown to the operator.

use std::sync::Arc;

use heroslides_core::error::CoreError;
use heroslides_core::hero_slide::{HeroSlide, SlidePayload};
use heroslides_core::messages;
use heroslides_core::notification::{FailureKind, Notification};
use heroslides_core::types::DbId;

use crate::api::ApiError;
use crate::backend::SlideBackend;
use crate::notifier::Notifier;
use crate::store::SlideLoader;

/// A failed write, ready to show to the operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MutationError {
    pub kind: FailureKind,
    pub message: String,
}

impl MutationError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ApiError> for MutationError {
    fn from(err: ApiError) -> Self {
        let kind = err.failure_kind();
        let message = match err.detail() {
            Some(detail) => format!("{}: {detail}", kind.user_message()),
            None => kind.user_message().to_string(),
        };
        Self { kind, message }
    }
}

impl From<CoreError> for MutationError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::new(FailureKind::Validation, msg),
            CoreError::NotFound { .. } => {
                Self::new(FailureKind::NotFound, messages::NOT_FOUND_FAILURE)
            }
        }
    }
}

/// Dispatches writes against a backend.
pub struct SlideMutations<B> {
    backend: Arc<B>,
    notifier: Arc<Notifier>,
}

impl<B: SlideBackend> SlideMutations<B> {
    pub fn new(backend: Arc<B>, notifier: Arc<Notifier>) -> Self {
        Self { backend, notifier }
    }

    /// Create a slide. The server assigns its id.
    pub async fn create(
        &self,
        loader: &mut SlideLoader<B>,
        payload: &SlidePayload,
    ) -> Result<HeroSlide, MutationError> {
        match self.backend.create(payload).await {
            Ok(slide) => {
                tracing::info!(slide_id = slide.id, "Hero slide created");
                loader.invalidate().await;
                self.notifier.publish(Notification::success(messages::SLIDE_CREATED));
                Ok(slide)
            }
            Err(e) => Err(self.fail(messages::CREATE_FAILED, None, e)),
        }
    }

    /// Replace the fields `payload` names on slide `id`.
    pub async fn update(
        &self,
        loader: &mut SlideLoader<B>,
        id: DbId,
        payload: &SlidePayload,
    ) -> Result<HeroSlide, MutationError> {
        match self.backend.update(id, payload).await {
            Ok(slide) => {
                tracing::info!(slide_id = id, "Hero slide updated");
                loader.invalidate().await;
                self.notifier.publish(Notification::success(messages::SLIDE_UPDATED));
                Ok(slide)
            }
            Err(e) => Err(self.fail(messages::UPDATE_FAILED, Some(id), e)),
        }
    }

    /// Hard-delete slide `id`.
    pub async fn delete(&self, loader: &mut SlideLoader<B>, id: DbId) -> Result<(), MutationError> {
        match self.backend.delete(id).await {
            Ok(()) => {
                tracing::info!(slide_id = id, "Hero slide deleted");
                loader.invalidate().await;
                self.notifier.publish(Notification::success(messages::SLIDE_DELETED));
                Ok(())
            }
            Err(e) => Err(self.fail(messages::DELETE_FAILED, Some(id), e)),
        }
    }

    /// Apply `(id, display_order)` moves in sequence, then refetch once.
    ///
    /// The list is refetched even when a move fails part-way, since
    /// earlier moves may already have been applied.
    pub async fn reorder(
        &self,
        loader: &mut SlideLoader<B>,
        moves: &[(DbId, i32)],
    ) -> Result<(), MutationError> {
        if moves.is_empty() {
            return Ok(());
        }

        for &(id, order) in moves {
            if let Err(e) = self.backend.update(id, &SlidePayload::reorder(order)).await {
                let err = self.fail(messages::REORDER_FAILED, Some(id), e);
                loader.invalidate().await;
                return Err(err);
            }
        }

        tracing::info!(moves = moves.len(), "Hero slides reordered");
        loader.invalidate().await;
        self.notifier.publish(Notification::success(messages::SLIDES_REORDERED));
        Ok(())
    }

    /// Publish a client-side failure that never reached the backend.
    pub fn reject(&self, title: &str, err: MutationError) -> MutationError {
        tracing::warn!(error = %err, "Hero slide write rejected");
        self.notifier
            .publish(Notification::error(title, err.kind, err.message.clone()));
        err
    }

    fn fail(&self, title: &str, id: Option<DbId>, err: ApiError) -> MutationError {
        tracing::warn!(slide_id = ?id, error = %err, "Hero slide write failed");
        let err = MutationError::from(err);
        self.notifier
            .publish(Notification::error(title, err.kind, err.message.clone()));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_includes_server_detail() {
        let err = MutationError::from(ApiError::from_status(
            422,
            r#"{"error":"imageUrl is required"}"#,
        ));
        assert_eq!(err.kind, FailureKind::Validation);
        assert_eq!(
            err.message,
            "Los datos del slide no son válidos: imageUrl is required"
        );
    }

    #[test]
    fn api_error_without_detail_uses_generic_message() {
        let err = MutationError::from(ApiError::from_status(404, ""));
        assert_eq!(err.kind, FailureKind::NotFound);
        assert_eq!(err.message, "El slide ya no existe");
    }

    #[test]
    fn core_validation_keeps_its_message() {
        let err = MutationError::from(CoreError::Validation("El título es obligatorio".into()));
        assert_eq!(err.kind, FailureKind::Validation);
        assert_eq!(err.to_string(), "El título es obligatorio");
    }
}
