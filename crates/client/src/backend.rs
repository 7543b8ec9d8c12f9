//! The seam between the screen and wherever slides are stored.

use async_trait::async_trait;

use heroslides_core::hero_slide::{HeroSlide, SlidePayload};
use heroslides_core::types::DbId;

use crate::api::ApiError;

/// CRUD access to the hero slide collection.
///
/// [`HeroSlidesApi`](crate::api::HeroSlidesApi) is the production
/// implementation.
#[async_trait]
pub trait SlideBackend: Send + Sync {
    /// Every slide, in the order the backend chooses.
    async fn list(&self) -> Result<Vec<HeroSlide>, ApiError>;

    async fn create(&self, payload: &SlidePayload) -> Result<HeroSlide, ApiError>;

    async fn update(&self, id: DbId, payload: &SlidePayload) -> Result<HeroSlide, ApiError>;

    async fn delete(&self, id: DbId) -> Result<(), ApiError>;
}
