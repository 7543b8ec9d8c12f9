//! Hero slide model, write payload, validation and display ordering.
//!
//! A [`HeroSlide`] is a read replica of a server-owned record. Writes go
//! out as a [`SlidePayload`], where every field is optional so partial
//! updates only touch the fields they name.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in [`CoreError::NotFound`].
pub const ENTITY_NAME: &str = "HeroSlide";

/// Display order assigned when none is given.
pub const DEFAULT_DISPLAY_ORDER: i32 = 0;

/// Image shown in place of a slide image that is missing or fails to load.
pub const FALLBACK_IMAGE_URL: &str = "/public/logo-softwarepar.png";

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// A homepage carousel banner as returned by the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_link: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

fn default_active() -> bool {
    true
}

impl HeroSlide {
    /// Build a record from a create payload, as a server would.
    ///
    /// `title` and `imageUrl` must be present; everything else falls back
    /// to its default.
    pub fn from_payload(id: DbId, payload: &SlidePayload) -> Result<Self, CoreError> {
        validate_payload(payload, PayloadMode::Create)?;

        let mut slide = Self {
            id,
            title: String::new(),
            subtitle: None,
            description: None,
            image_url: String::new(),
            button_text: None,
            button_link: None,
            display_order: DEFAULT_DISPLAY_ORDER,
            is_active: true,
            created_at: None,
            updated_at: None,
        };
        slide.apply(payload);
        Ok(slide)
    }

    /// Replace every field the payload names. Absent fields keep their
    /// current value.
    pub fn apply(&mut self, payload: &SlidePayload) {
        if let Some(ref title) = payload.title {
            self.title = title.clone();
        }
        if let Some(ref subtitle) = payload.subtitle {
            self.subtitle = Some(subtitle.clone());
        }
        if let Some(ref description) = payload.description {
            self.description = Some(description.clone());
        }
        if let Some(ref image_url) = payload.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(ref button_text) = payload.button_text {
            self.button_text = Some(button_text.clone());
        }
        if let Some(ref button_link) = payload.button_link {
            self.button_link = Some(button_link.clone());
        }
        if let Some(order) = payload.display_order {
            self.display_order = order;
        }
        if let Some(active) = payload.is_active {
            self.is_active = active;
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Partial slide payload sent on create and update.
///
/// Absent fields are omitted from the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SlidePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "El título es obligatorio"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "La URL de imagen es obligatoria"))]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl SlidePayload {
    /// A payload that only moves a slide to a new display position.
    pub fn reorder(display_order: i32) -> Self {
        Self {
            display_order: Some(display_order),
            ..Self::default()
        }
    }
}

/// Which write a payload is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// `title` and `imageUrl` must be present.
    Create,
    /// Fields may be absent, but the ones present must be valid.
    Update,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a payload before it is dispatched.
///
/// Required text must be non-blank, and an image reference must be either a
/// site-relative path (`/public/x.jpg`) or an absolute `http`/`https` URL.
pub fn validate_payload(payload: &SlidePayload, mode: PayloadMode) -> Result<(), CoreError> {
    if let Err(errors) = payload.validate() {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        let message = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Campo inválido: {field}"))
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CoreError::Validation(message));
    }

    match (mode, payload.title.as_deref()) {
        (PayloadMode::Create, None) => {
            return Err(CoreError::Validation("El título es obligatorio".to_string()));
        }
        (_, Some(title)) if title.trim().is_empty() => {
            return Err(CoreError::Validation("El título es obligatorio".to_string()));
        }
        _ => {}
    }

    match (mode, payload.image_url.as_deref()) {
        (PayloadMode::Create, None) => Err(CoreError::Validation(
            "La URL de imagen es obligatoria".to_string(),
        )),
        (_, Some(url)) => validate_image_url(url),
        (PayloadMode::Update, None) => Ok(()),
    }
}

/// Validate an image reference: a site-relative path or an absolute web URL.
pub fn validate_image_url(url: &str) -> Result<(), CoreError> {
    if url.trim().is_empty() {
        return Err(CoreError::Validation(
            "La URL de imagen es obligatoria".to_string(),
        ));
    }
    // `//host/...` is protocol-relative and would load from another host.
    if url.starts_with('/') && !url.starts_with("//") && !url.contains(char::is_whitespace) {
        return Ok(());
    }

    let lower = url.to_ascii_lowercase();
    let web_scheme = lower.starts_with("http://") || lower.starts_with("https://");
    if web_scheme && url.to_string().validate_url() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "URL de imagen inválida '{url}'. Use /public/nombre.jpg o https://..."
        )))
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Sort slides by ascending display order. Ties keep their current order.
pub fn sort_for_display(slides: &mut [HeroSlide]) {
    slides.sort_by_key(|s| s.display_order);
}

/// Direction of a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Compute the display-order updates that move `id` one step in
/// `direction`, relative to its neighbour in display order.
///
/// Returns `(slide_id, new_display_order)` pairs, or an empty list when the
/// slide is unknown or already at that edge. Neighbours with distinct
/// orders swap them; a tie is broken by shifting only the moved slide.
pub fn plan_move(slides: &[HeroSlide], id: DbId, direction: MoveDirection) -> Vec<(DbId, i32)> {
    let mut ordered = slides.to_vec();
    sort_for_display(&mut ordered);

    let Some(index) = ordered.iter().position(|s| s.id == id) else {
        return Vec::new();
    };
    let neighbour_index = match direction {
        MoveDirection::Up if index > 0 => index - 1,
        MoveDirection::Down if index + 1 < ordered.len() => index + 1,
        _ => return Vec::new(),
    };

    let current = &ordered[index];
    let neighbour = &ordered[neighbour_index];

    if current.display_order == neighbour.display_order {
        let shifted = match direction {
            MoveDirection::Up => current.display_order.saturating_sub(1),
            MoveDirection::Down => current.display_order.saturating_add(1),
        };
        return vec![(current.id, shifted)];
    }

    vec![
        (current.id, neighbour.display_order),
        (neighbour.id, current.display_order),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
