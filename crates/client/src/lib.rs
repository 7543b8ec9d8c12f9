//! Hero slides admin client.
//!
//! Talks to the `/api/admin/hero-slides` REST resource and drives the
//! admin screen: a query store holding the slide list, create/update/delete
//! mutations that invalidate it, a notification bus, and the
//! [`screen::HeroSlidesScreen`] controller tying them to the modal form and
//! the slide table.

pub mod api;
pub mod backend;
pub mod config;
pub mod mutations;
pub mod notifier;
pub mod screen;
pub mod store;

pub use api::{ApiError, HeroSlidesApi};
pub use backend::SlideBackend;
pub use config::ClientConfig;
pub use screen::HeroSlidesScreen;
