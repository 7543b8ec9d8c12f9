use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::json;

use heroslides_core::hero_slide::{
    sort_for_display, validate_payload, HeroSlide, PayloadMode, SlidePayload,
};
use heroslides_core::types::DbId;

/// In-memory stand-in for the admin API, shared between the router and
/// the test body.
#[derive(Clone, Default)]
pub struct TestServer {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    slides: Vec<HeroSlide>,
    next_id: DbId,
    requests: Vec<String>,
    required_token: Option<String>,
}

impl TestServer {
    pub fn with_slides(slides: Vec<HeroSlide>) -> Self {
        let next_id = slides.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(Inner {
                slides,
                next_id,
                ..Inner::default()
            })),
        }
    }

    /// Reject requests without `Authorization: Bearer <token>`.
    pub fn require_token(self, token: &str) -> Self {
        self.inner.lock().unwrap().required_token = Some(token.to_string());
        self
    }

    /// `"METHOD /path"` of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn slides(&self) -> Vec<HeroSlide> {
        self.inner.lock().unwrap().slides.clone()
    }

    pub fn remove(&self, id: DbId) {
        self.inner.lock().unwrap().slides.retain(|s| s.id != id);
    }

    /// Serve on an ephemeral local port and return the base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/admin/hero-slides", get(list_slides).post(create_slide))
            .route(
                "/api/admin/hero-slides/{id}",
                put(update_slide).delete(delete_slide),
            )
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn record(&self, request: String, headers: &HeaderMap) -> Result<(), Response> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request);

        if let Some(ref token) = inner.required_token {
            let expected = format!("Bearer {token}");
            let given = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if given != expected {
                return Err(error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Missing or invalid token"));
            }
        }
        Ok(())
    }
}

/// A base URL nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn slide(id: DbId, title: &str, order: i32) -> HeroSlide {
    HeroSlide {
        id,
        title: title.to_string(),
        subtitle: None,
        description: None,
        image_url: format!("/public/{id}.jpg"),
        button_text: None,
        button_link: None,
        display_order: order,
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

fn error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "error": message, "code": code }))).into_response()
}

async fn list_slides(State(server): State<TestServer>, headers: HeaderMap) -> Response {
    if let Err(resp) = server.record("GET /api/admin/hero-slides".into(), &headers) {
        return resp;
    }
    let mut slides = server.slides();
    sort_for_display(&mut slides);
    Json(slides).into_response()
}

async fn create_slide(
    State(server): State<TestServer>,
    headers: HeaderMap,
    Json(payload): Json<SlidePayload>,
) -> Response {
    if let Err(resp) = server.record("POST /api/admin/hero-slides".into(), &headers) {
        return resp;
    }
    if let Err(e) = validate_payload(&payload, PayloadMode::Create) {
        return error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", &e.to_string());
    }

    let mut inner = server.inner.lock().unwrap();
    let id = inner.next_id;
    let slide = match HeroSlide::from_payload(id, &payload) {
        Ok(slide) => slide,
        Err(e) => return error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", &e.to_string()),
    };
    inner.next_id += 1;
    inner.slides.push(slide.clone());
    (StatusCode::CREATED, Json(slide)).into_response()
}

async fn update_slide(
    State(server): State<TestServer>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(payload): Json<SlidePayload>,
) -> Response {
    if let Err(resp) = server.record(format!("PUT /api/admin/hero-slides/{id}"), &headers) {
        return resp;
    }
    if let Err(e) = validate_payload(&payload, PayloadMode::Update) {
        return error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", &e.to_string());
    }

    let mut inner = server.inner.lock().unwrap();
    match inner.slides.iter_mut().find(|s| s.id == id) {
        Some(slide) => {
            slide.apply(&payload);
            Json(slide.clone()).into_response()
        }
        None => error(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            &format!("HeroSlide with id {id} not found"),
        ),
    }
}

async fn delete_slide(
    State(server): State<TestServer>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = server.record(format!("DELETE /api/admin/hero-slides/{id}"), &headers) {
        return resp;
    }

    let mut inner = server.inner.lock().unwrap();
    let before = inner.slides.len();
    inner.slides.retain(|s| s.id != id);
    if inner.slides.len() == before {
        return error(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            &format!("HeroSlide with id {id} not found"),
        );
    }
    StatusCode::NO_CONTENT.into_response()
}
