//! Typed state for the create/edit slide modal.
//!
//! The form holds raw operator input per field. [`SlideForm::submit`]
//! coerces it into a [`SlidePayload`], validates it, and decides whether
//! the result is a create or an update.

use crate::error::CoreError;
use crate::hero_slide::{validate_payload, HeroSlide, PayloadMode, SlidePayload};
use crate::messages;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Value a checkbox-style control submits when switched on.
pub const TOGGLE_ON: &str = "on";

/// A single input of the slide form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Subtitle,
    Description,
    ImageUrl,
    ButtonText,
    ButtonLink,
    DisplayOrder,
    IsActive,
}

impl FormField {
    /// Every field, in the order the modal lays them out.
    pub const ALL: [FormField; 8] = [
        FormField::Title,
        FormField::Subtitle,
        FormField::Description,
        FormField::ImageUrl,
        FormField::ButtonText,
        FormField::ButtonLink,
        FormField::DisplayOrder,
        FormField::IsActive,
    ];

    /// Submitted field name, matching the JSON key of the payload.
    pub fn name(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Subtitle => "subtitle",
            FormField::Description => "description",
            FormField::ImageUrl => "imageUrl",
            FormField::ButtonText => "buttonText",
            FormField::ButtonLink => "buttonLink",
            FormField::DisplayOrder => "displayOrder",
            FormField::IsActive => "isActive",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Whether the field must be filled before submitting.
    pub fn is_required(self) -> bool {
        matches!(self, FormField::Title | FormField::ImageUrl)
    }
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// Whether the modal creates a new slide or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(DbId),
}

/// The write a valid form turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(SlidePayload),
    Update { id: DbId, payload: SlidePayload },
}

/// Raw operator input for one slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideForm {
    mode: FormMode,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub button_text: String,
    pub button_link: String,
    /// Kept as typed so non-numeric input can be coerced at submit time.
    pub display_order: String,
    pub is_active: bool,
}

impl SlideForm {
    /// Blank form for a new slide: order `0`, active.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            subtitle: String::new(),
            description: String::new(),
            image_url: String::new(),
            button_text: String::new(),
            button_link: String::new(),
            display_order: "0".to_string(),
            is_active: true,
        }
    }

    /// Form pre-filled from an existing slide. Absent optional text
    /// becomes an empty string.
    pub fn edit(slide: &HeroSlide) -> Self {
        Self {
            mode: FormMode::Edit(slide.id),
            title: slide.title.clone(),
            subtitle: slide.subtitle.clone().unwrap_or_default(),
            description: slide.description.clone().unwrap_or_default(),
            image_url: slide.image_url.clone(),
            button_text: slide.button_text.clone().unwrap_or_default(),
            button_link: slide.button_link.clone().unwrap_or_default(),
            display_order: slide.display_order.to_string(),
            is_active: slide.is_active,
        }
    }

    /// Build a form from submitted `name=value` pairs.
    ///
    /// Unknown names are ignored. The active toggle is only on when the
    /// `isActive` entry is present with the value `"on"`; an absent entry
    /// means the control was off.
    pub fn from_submission<I, K, V>(mode: FormMode, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut form = Self {
            mode,
            display_order: String::new(),
            is_active: false,
            ..Self::create()
        };
        for (name, value) in entries {
            if let Some(field) = FormField::from_name(name.as_ref()) {
                form.set(field, value.as_ref());
            }
        }
        form
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Modal heading for the current mode.
    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => messages::DIALOG_CREATE_TITLE,
            FormMode::Edit(_) => messages::DIALOG_EDIT_TITLE,
        }
    }

    /// Label of the submit control for the current mode.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => messages::SUBMIT_CREATE_LABEL,
            FormMode::Edit(_) => messages::SUBMIT_UPDATE_LABEL,
        }
    }

    /// Set one field from its raw input value.
    pub fn set(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Title => self.title = value.to_string(),
            FormField::Subtitle => self.subtitle = value.to_string(),
            FormField::Description => self.description = value.to_string(),
            FormField::ImageUrl => self.image_url = value.to_string(),
            FormField::ButtonText => self.button_text = value.to_string(),
            FormField::ButtonLink => self.button_link = value.to_string(),
            FormField::DisplayOrder => self.display_order = value.to_string(),
            FormField::IsActive => self.is_active = value == TOGGLE_ON,
        }
    }

    /// Flip the active toggle.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Coerce the raw input into a full payload. Text is passed through
    /// untouched.
    pub fn to_payload(&self) -> SlidePayload {
        SlidePayload {
            title: Some(self.title.clone()),
            subtitle: Some(self.subtitle.clone()),
            description: Some(self.description.clone()),
            image_url: Some(self.image_url.clone()),
            button_text: Some(self.button_text.clone()),
            button_link: Some(self.button_link.clone()),
            display_order: Some(parse_display_order(&self.display_order)),
            is_active: Some(self.is_active),
        }
    }

    /// Validate the form and turn it into the write it stands for.
    pub fn submit(&self) -> Result<Submission, CoreError> {
        let payload = self.to_payload();
        validate_payload(&payload, PayloadMode::Create)?;

        Ok(match self.mode {
            FormMode::Create => Submission::Create(payload),
            FormMode::Edit(id) => Submission::Update { id, payload },
        })
    }
}

/// Parse a display order the way a lenient integer input does.
///
/// Leading whitespace and an optional sign are accepted, then as many
/// decimal digits as follow (`"12px"` is `12`, `"3.7"` is `3`). Input with
/// no leading digits is `0`. Out-of-range values clamp to `i32`.
pub fn parse_display_order(raw: &str) -> i32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if !seen {
        return 0;
    }

    let signed = if negative { -value } else { value };
    signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> HeroSlide {
        HeroSlide {
            id: 4,
            title: "Welcome".to_string(),
            subtitle: None,
            description: Some("Linea 1\nLinea 2".to_string()),
            image_url: "/public/hero.jpg".to_string(),
            button_text: None,
            button_link: Some("#contacto".to_string()),
            display_order: 2,
            is_active: false,
            created_at: None,
            updated_at: None,
        }
    }

    // -- parse_display_order -------------------------------------------------

    #[test]
    fn non_numeric_order_defaults_to_zero() {
        assert_eq!(parse_display_order("abc"), 0);
        assert_eq!(parse_display_order(""), 0);
        assert_eq!(parse_display_order("-"), 0);
    }

    #[test]
    fn order_uses_leading_integer() {
        assert_eq!(parse_display_order("7"), 7);
        assert_eq!(parse_display_order("  12px"), 12);
        assert_eq!(parse_display_order("3.7"), 3);
        assert_eq!(parse_display_order("-2"), -2);
        assert_eq!(parse_display_order("+5"), 5);
    }

    #[test]
    fn huge_order_clamps() {
        assert_eq!(parse_display_order("99999999999999"), i32::MAX);
        assert_eq!(parse_display_order("-99999999999999"), i32::MIN);
    }

    // -- modes ---------------------------------------------------------------

    #[test]
    fn create_form_defaults() {
        let form = SlideForm::create();
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.display_order, "0");
        assert!(form.is_active);
        assert_eq!(form.heading(), "Nuevo Slide");
        assert_eq!(form.submit_label(), "Crear");
    }

    #[test]
    fn edit_form_prefills_and_blanks_missing_optionals() {
        let form = SlideForm::edit(&existing());
        assert_eq!(form.mode(), FormMode::Edit(4));
        assert_eq!(form.title, "Welcome");
        assert_eq!(form.subtitle, "");
        assert_eq!(form.button_text, "");
        assert_eq!(form.button_link, "#contacto");
        assert_eq!(form.display_order, "2");
        assert!(!form.is_active);
        assert_eq!(form.heading(), "Editar Slide");
        assert_eq!(form.submit_label(), "Actualizar");
    }

    // -- submission ----------------------------------------------------------

    #[test]
    fn toggle_absent_means_inactive() {
        let form = SlideForm::from_submission(
            FormMode::Create,
            [("title", "Sale"), ("imageUrl", "/x.jpg"), ("displayOrder", "2")],
        );
        assert_eq!(form.to_payload().is_active, Some(false));
    }

    #[test]
    fn toggle_on_means_active() {
        let form = SlideForm::from_submission(
            FormMode::Create,
            [("title", "Sale"), ("imageUrl", "/x.jpg"), ("isActive", "on")],
        );
        assert_eq!(form.to_payload().is_active, Some(true));
    }

    #[test]
    fn submission_coerces_order_and_keeps_text() {
        let form = SlideForm::from_submission(
            FormMode::Create,
            [
                ("title", "  Sale  "),
                ("imageUrl", "/x.jpg"),
                ("displayOrder", "abc"),
                ("unknown", "ignored"),
            ],
        );
        let payload = form.to_payload();
        assert_eq!(payload.title.as_deref(), Some("  Sale  "));
        assert_eq!(payload.display_order, Some(0));
        assert_eq!(payload.subtitle.as_deref(), Some(""));
    }

    #[test]
    fn submit_in_create_mode_yields_create() {
        let mut form = SlideForm::create();
        form.set(FormField::Title, "Sale");
        form.set(FormField::ImageUrl, "/x.jpg");
        form.set(FormField::DisplayOrder, "2");

        match form.submit().unwrap() {
            Submission::Create(payload) => {
                assert_eq!(payload.title.as_deref(), Some("Sale"));
                assert_eq!(payload.display_order, Some(2));
                assert_eq!(payload.is_active, Some(true));
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn submit_in_edit_mode_yields_update_with_id() {
        let mut form = SlideForm::edit(&existing());
        form.set(FormField::Title, "Bienvenido");

        match form.submit().unwrap() {
            Submission::Update { id, payload } => {
                assert_eq!(id, 4);
                assert_eq!(payload.title.as_deref(), Some("Bienvenido"));
                assert_eq!(payload.image_url.as_deref(), Some("/public/hero.jpg"));
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn submit_rejects_missing_required_fields() {
        let form = SlideForm::create();
        assert!(matches!(form.submit(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_name(field.name()), Some(field));
        }
        assert!(FormField::Title.is_required());
        assert!(!FormField::ButtonLink.is_required());
    }
}
