//! Domain types for the hero slides admin screen.
//!
//! Everything here is free of I/O: the slide model and its payloads,
//! payload validation, the typed modal form, display ordering, and the
//! notification types shown to the operator. The HTTP client and the
//! screen controller live in `heroslides-client`.

pub mod error;
pub mod form;
pub mod hero_slide;
pub mod messages;
pub mod notification;
pub mod types;
