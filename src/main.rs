use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use docspot_core::{
    Appointment, AppointmentStatus, BookingRequest, CoreConfig, Docspot, DocspotError, Identity,
    RegisterData, Role, RouteAccess, Slot, check_route,
};

/// Application state shared across REST API handlers.
///
/// The core store is single-writer by design; the mutex hands each request
/// exclusive access, so the REST layer adds no concurrency the core does not
/// already account for.
#[derive(Clone)]
struct AppState {
    market: Arc<Mutex<Docspot>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, login, book),
    components(schemas(HealthRes, LoginReq, BookReq))
)]
struct ApiDoc;

/// Main entry point for the DocSpot application.
///
/// Serves the appointment-booking REST API, seeded with the demo
/// marketplace data.
///
/// # Environment Variables
/// - `DOCSPOT_ADDR`: listen address (default: "0.0.0.0:3000")
/// - `DOCSPOT_DATA_DIR`: directory for the persisted session document
///   (default: "docspot_data")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docspot=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("DOCSPOT_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = std::env::var("DOCSPOT_DATA_DIR").ok().map(PathBuf::from);

    let config = CoreConfig::resolve(data_dir);
    let market = Docspot::seeded(config)?;

    tracing::info!("++ Starting DocSpot REST on {}", addr);

    let app = router(market)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the API router over a marketplace store.
fn router(market: Docspot) -> Router {
    let state = AppState {
        market: Arc::new(Mutex::new(market)),
    };

    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/doctors", get(list_doctors))
        .route("/admin/doctors", get(admin_doctors))
        .route("/admin/doctors/:id/approve", post(approve_doctor))
        .route("/admin/doctors/:id/reject", post(reject_doctor))
        .route("/appointments", get(list_appointments).post(book))
        .route("/appointments/:id/confirm", post(confirm_appointment))
        .route("/appointments/:id/cancel", post(cancel_appointment))
        .route("/appointments/:id/complete", post(complete_appointment))
        .with_state(state)
}

// ============================================================================
// Error mapping
// ============================================================================

/// A REST-facing error: a status code and a user-visible message.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "sign in required")
    }

    fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "not allowed for this role")
    }
}

impl From<DocspotError> for ApiError {
    fn from(err: DocspotError) -> Self {
        use DocspotError::*;
        let status = match &err {
            Validation(_) | InvalidSlot(_) | DateOutOfWindow { .. } | InvalidValue(_) => {
                StatusCode::BAD_REQUEST
            }
            DoctorNotFound(_) | PatientNotFound(_) | AppointmentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            NotOwner { .. } => StatusCode::FORBIDDEN,
            InvalidTransition { .. } => StatusCode::CONFLICT,
            SessionRead(_) | SessionWrite(_) | Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Applies the authorization gate to a request.
///
/// Re-evaluated on every request, never cached: login redirects become 401,
/// unauthorized redirects become 403.
fn require(identity: Option<&Identity>, role: Option<Role>) -> Result<&Identity, ApiError> {
    match (check_route(identity, role), identity) {
        (RouteAccess::Allow, Some(identity)) => Ok(identity),
        (RouteAccess::RedirectToUnauthorized, _) => Err(ApiError::forbidden()),
        _ => Err(ApiError::unauthenticated()),
    }
}

// ============================================================================
// Request/response shapes
// ============================================================================

#[derive(Serialize, ToSchema)]
struct HealthRes {
    status: String,
}

#[derive(Deserialize, ToSchema)]
struct LoginReq {
    email: String,
    password: String,
}

#[derive(Deserialize, ToSchema)]
struct BookReq {
    doctor_id: String,
    /// ISO calendar date, e.g. "2024-02-01".
    date: chrono::NaiveDate,
    /// One of the fixed slot labels, e.g. "10:00 AM".
    time: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    documents: Vec<String>,
}

#[derive(Deserialize)]
struct AppointmentFilter {
    #[serde(default)]
    status: Option<AppointmentStatus>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Liveness check.
#[utoipa::path(get, path = "/health", responses((status = 200, body = HealthRes)))]
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        status: "ok".into(),
    })
}

/// Signs in and returns the authenticated identity.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Signed in"),
        (status = 401, description = "No identity matches the email")
    )
)]
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<Identity>, ApiError> {
    let mut market = state.market.lock().await;
    let ok = market.sign_in(&req.email, &req.password).await?;
    if !ok {
        return Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "invalid email or password",
        ));
    }
    let identity = market
        .current_identity()
        .cloned()
        .ok_or_else(ApiError::unauthenticated)?;
    Ok(Json(identity))
}

async fn register(
    State(state): State<AppState>,
    Json(data): Json<RegisterData>,
) -> Result<(StatusCode, Json<Identity>), ApiError> {
    let mut market = state.market.lock().await;
    let ok = market.register(data).await?;
    if !ok {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "email already registered",
        ));
    }
    let identity = market
        .current_identity()
        .cloned()
        .ok_or_else(ApiError::unauthenticated)?;
    Ok((StatusCode::CREATED, Json(identity)))
}

async fn logout(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let mut market = state.market.lock().await;
    market.sign_out()?;
    Ok(StatusCode::NO_CONTENT)
}

async fn me(State(state): State<AppState>) -> Result<Json<Identity>, ApiError> {
    let market = state.market.lock().await;
    let identity = require(market.current_identity(), None)?;
    Ok(Json(identity.clone()))
}

/// The public marketplace listing: approved doctors only.
async fn list_doctors(State(state): State<AppState>) -> Json<Vec<docspot_core::Doctor>> {
    let market = state.market.lock().await;
    Json(market.approved_doctors().into_iter().cloned().collect())
}

/// Admin overview of the whole directory, pending applications included.
async fn admin_doctors(
    State(state): State<AppState>,
) -> Result<Json<Vec<docspot_core::Doctor>>, ApiError> {
    let market = state.market.lock().await;
    require(market.current_identity(), Some(Role::Admin))?;
    Ok(Json(market.doctors().to_vec()))
}

async fn approve_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut market = state.market.lock().await;
    require(market.current_identity(), Some(Role::Admin))?;
    market.approve_doctor(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reject_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut market = state.market.lock().await;
    require(market.current_identity(), Some(Role::Admin))?;
    market.reject_doctor(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Books an appointment for the signed-in customer.
#[utoipa::path(
    post,
    path = "/appointments",
    request_body = BookReq,
    responses(
        (status = 201, description = "Appointment created, pending confirmation"),
        (status = 400, description = "Bad slot or date outside the booking window"),
        (status = 404, description = "Doctor does not exist")
    )
)]
async fn book(
    State(state): State<AppState>,
    Json(req): Json<BookReq>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let mut market = state.market.lock().await;
    let patient_id = require(market.current_identity(), Some(Role::Customer))?
        .id
        .clone();

    let request = BookingRequest {
        doctor_id: req.doctor_id,
        date: req.date,
        time: Slot::parse(&req.time)?,
        notes: req.notes,
        documents: req.documents,
    };
    let appointment = market.book(&patient_id, request).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Lists appointments scoped to the caller's role: customers see their own
/// history, doctors their queue, admins everything. An optional `status`
/// query narrows the result.
async fn list_appointments(
    State(state): State<AppState>,
    Query(filter): Query<AppointmentFilter>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let market = state.market.lock().await;
    let identity = require(market.current_identity(), None)?;

    let scoped: Vec<Appointment> = match identity.role {
        Role::Admin => market.appointments().to_vec(),
        Role::Doctor => market
            .appointments_for_doctor(&identity.id)
            .into_iter()
            .cloned()
            .collect(),
        Role::Customer => market
            .appointments_for_patient(&identity.id)
            .into_iter()
            .cloned()
            .collect(),
    };

    let result = match filter.status {
        Some(status) => scoped.into_iter().filter(|a| a.status == status).collect(),
        None => scoped,
    };
    Ok(Json(result))
}

async fn confirm_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut market = state.market.lock().await;
    let actor_id = require(market.current_identity(), Some(Role::Doctor))?
        .id
        .clone();
    market.confirm_appointment(&id, &actor_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Cancellation is open to both sides of the booking; ownership is enforced
/// by the ledger, so the gate only requires a signed-in identity.
async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut market = state.market.lock().await;
    let actor_id = require(market.current_identity(), None)?.id.clone();
    market.cancel_appointment(&id, &actor_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn complete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut market = state.market.lock().await;
    let actor_id = require(market.current_identity(), Some(Role::Doctor))?
        .id
        .clone();
    market.complete_appointment(&id, &actor_id)?;
    Ok(StatusCode::NO_CONTENT)
}
