//! HTTP surface of the greetings API.
//!
//! Thin glue over the greetings module: extract request data, invoke the
//! operation, and translate the result into the API's JSON envelopes.
//! Success bodies carry `success`/`data` (plus `count` for lists and
//! `message` for mutations); every failure is `{"error": "..."}` with the
//! appropriate status code.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::models::{Greeting, GreetingDraft};
use crate::server::greetings::{self, GreetingError, GreetingFilter};
use crate::server::storage::GreetingStore;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    store: GreetingStore,
}

// ============================================================================
// Response shapes
// ============================================================================

/// Response for the list route.
#[derive(Serialize)]
struct ListResponse {
    success: bool,
    count: usize,
    data: Vec<Greeting>,
}

/// Response for a single-record read.
#[derive(Serialize)]
struct RecordResponse {
    success: bool,
    data: Greeting,
}

/// Response for a successful create/update/delete.
#[derive(Serialize)]
struct MutationResponse {
    success: bool,
    message: &'static str,
    data: Greeting,
}

/// Error body shared by all failure responses.
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

fn error_response(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

/// Maps an operation error to a response.
///
/// `internal` is the client-facing message for storage failures; the
/// underlying error is logged, not exposed.
fn map_error(err: GreetingError, internal: &'static str) -> Response {
    match err {
        GreetingError::MissingFields => error_response(
            StatusCode::BAD_REQUEST,
            "Language and greeting are required fields",
        ),
        GreetingError::DuplicateLanguage(_) => error_response(
            StatusCode::CONFLICT,
            "Greeting for this language already exists",
        ),
        GreetingError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "Greeting not found")
        }
        GreetingError::Storage(e) => {
            tracing::error!("storage failure: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, internal)
        }
    }
}

/// Parses the id path segment, rejecting non-integer input.
fn parse_id(raw: &str) -> Result<u64, Response> {
    raw.parse()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid ID format"))
}

// ============================================================================
// Handlers
// ============================================================================

/// Query parameters accepted by the list route.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListParams {
    language: Option<String>,
    formal: Option<String>,
}

impl ListParams {
    /// Converts raw query strings into a filter. For `formal`, the string
    /// `"true"` means true and anything else means false.
    fn into_filter(self) -> GreetingFilter {
        GreetingFilter {
            language: self.language,
            formal: self.formal.map(|f| f == "true"),
        }
    }
}

async fn list_greetings(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    match greetings::list(&state.store, &params.into_filter()) {
        Ok(data) => Json(ListResponse {
            success: true,
            count: data.len(),
            data,
        })
        .into_response(),
        Err(e) => map_error(e, "Failed to retrieve greetings"),
    }
}

async fn get_greeting(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match greetings::get(&state.store, id) {
        Ok(data) => Json(RecordResponse {
            success: true,
            data,
        })
        .into_response(),
        Err(e) => map_error(e, "Failed to retrieve greeting"),
    }
}

async fn create_greeting(
    State(state): State<AppState>,
    Json(draft): Json<GreetingDraft>,
) -> Response {
    match greetings::create(&state.store, &draft) {
        Ok(data) => (
            StatusCode::CREATED,
            Json(MutationResponse {
                success: true,
                message: "Greeting created successfully",
                data,
            }),
        )
            .into_response(),
        Err(e) => map_error(e, "Failed to create greeting"),
    }
}

async fn update_greeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<GreetingDraft>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match greetings::update(&state.store, id, &draft) {
        Ok(data) => Json(MutationResponse {
            success: true,
            message: "Greeting updated successfully",
            data,
        })
        .into_response(),
        Err(e) => map_error(e, "Failed to update greeting"),
    }
}

async fn delete_greeting(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match greetings::delete(&state.store, id) {
        Ok(data) => Json(MutationResponse {
            success: true,
            message: "Greeting deleted successfully",
            data,
        })
        .into_response(),
        Err(e) => map_error(e, "Failed to delete greeting"),
    }
}

// ============================================================================
// Service metadata
// ============================================================================

/// Endpoint map returned by the root route.
#[derive(Serialize)]
struct EndpointInfo {
    greetings: &'static str,
    methods: [&'static str; 4],
}

/// Root route response.
#[derive(Serialize)]
struct ApiInfo {
    message: &'static str,
    version: &'static str,
    endpoints: EndpointInfo,
}

async fn root() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Welcome to the Hello World API!",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: EndpointInfo {
            greetings: "/api/greetings",
            methods: ["GET", "POST", "PUT", "DELETE"],
        },
    })
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

/// Builds the application router over the given store.
pub fn router(store: GreetingStore) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/greetings", get(list_greetings).post(create_greeting))
        .route(
            "/api/greetings/{id}",
            get(get_greeting)
                .put(update_greeting)
                .delete(delete_greeting),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
