//! Operator-facing text of the hero slides screen.

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

pub const LOADING_TEXT: &str = "Cargando slides...";
pub const LOAD_FAILED_TEXT: &str = "No se pudieron cargar los slides";

/// Table column headers, left to right.
pub const TABLE_HEADERS: [&str; 5] = ["Orden", "Imagen", "Título", "Estado", "Acciones"];

pub const STATUS_ACTIVE: &str = "Activo";
pub const STATUS_INACTIVE: &str = "Inactivo";

pub const DELETE_CONFIRM_PROMPT: &str = "¿Eliminar este slide?";

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

pub const DIALOG_CREATE_TITLE: &str = "Nuevo Slide";
pub const DIALOG_EDIT_TITLE: &str = "Editar Slide";
pub const SUBMIT_CREATE_LABEL: &str = "Crear";
pub const SUBMIT_UPDATE_LABEL: &str = "Actualizar";
pub const CANCEL_LABEL: &str = "Cancelar";
pub const NO_OPEN_FORM: &str = "No hay ningún formulario abierto";

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

pub const SLIDE_CREATED: &str = "Slide creado exitosamente";
pub const SLIDE_UPDATED: &str = "Slide actualizado exitosamente";
pub const SLIDE_DELETED: &str = "Slide eliminado exitosamente";
pub const SLIDES_REORDERED: &str = "Orden actualizado exitosamente";

pub const CREATE_FAILED: &str = "No se pudo crear el slide";
pub const UPDATE_FAILED: &str = "No se pudo actualizar el slide";
pub const DELETE_FAILED: &str = "No se pudo eliminar el slide";
pub const REORDER_FAILED: &str = "No se pudo cambiar el orden";

pub const NETWORK_FAILURE: &str = "No se pudo conectar con el servidor";
pub const UNAUTHORIZED_FAILURE: &str = "No tiene permisos para realizar esta acción";
pub const VALIDATION_FAILURE: &str = "Los datos del slide no son válidos";
pub const NOT_FOUND_FAILURE: &str = "El slide ya no existe";
pub const SERVER_FAILURE: &str = "Error del servidor, intente de nuevo";
