// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod scheduler;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use gleaner::{StatusEngine, SystemClock};
use gleaner_api::{
    ApiError, AttachDonationRequest, AuthenticatedActor, BackfillResponse,
    ChangeEventStatusRequest, CreateEventRequest, EventInfo, ListFinishableResponse, Role,
    SweepResponse, VolunteerRequest, attach_merchant_donation, authenticate_stub,
    backfill_status_history, change_event_status, check_event_status, create_event, get_event,
    list_finishable, register_volunteer, sweep, unregister_volunteer,
};
use gleaner_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::scheduler::spawn_sweep_scheduler;

/// The engine as the server runs it.
pub(crate) type Engine = StatusEngine<Persistence, SystemClock>;

/// The engine shared between request handlers and the sweep scheduler.
pub(crate) type SharedEngine = Arc<Mutex<Engine>>;

/// Gleaner Server - HTTP server for the event status engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "GLEANER_DATABASE")]
    database: Option<String>,

    /// MariaDB/MySQL connection URL, used instead of `SQLite`
    #[arg(long, env = "GLEANER_MYSQL_URL", conflicts_with = "database")]
    mysql_url: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "GLEANER_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, env = "GLEANER_PORT", default_value_t = 3000)]
    port: u16,

    /// Seconds between scheduled sweeps. 0 disables the scheduler.
    #[arg(long, env = "GLEANER_SWEEP_INTERVAL_SECS", default_value_t = 3600)]
    sweep_interval_secs: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The status engine over the configured database.
    engine: SharedEngine,
}

/// Identifies the caller of an endpoint.
///
/// Sent in the JSON body of writes and as query parameters of reads.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorFields {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
}

/// API request for creating an event.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateEventApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// Display name.
    title: String,
    /// The event type.
    event_type: String,
    /// Scheduled start (RFC 3339).
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    /// Scheduled end (RFC 3339).
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
    /// Volunteer headcount the event needs.
    expected_volunteers: i64,
    /// The recurring series this occurrence belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_event_id: Option<i64>,
}

/// API request for overriding an event's status.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ChangeStatusApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The requested status.
    status: String,
    /// Why the status is being overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// API request for registering a volunteer.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterVolunteerApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The volunteer to register.
    volunteer_id: i64,
}

/// API request for attaching a merchant donation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AttachDonationApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The donating merchant.
    merchant_id: i64,
    /// Free-form description of the donation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses the caller's role and authenticates them.
fn authenticate(actor: &ActorFields) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = Role::from_str(&actor.actor_role).map_err(ApiError::from)?;
    let authenticated: AuthenticatedActor =
        authenticate_stub(actor.actor_id.clone(), role).map_err(ApiError::from)?;
    Ok(authenticated)
}

/// Handler for POST `/events` endpoint.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEventApiRequest>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(
        actor_id = %req.actor.actor_id,
        role = %req.actor.actor_role,
        event_type = %req.event_type,
        "Handling create_event request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor)?;

    let request: CreateEventRequest = CreateEventRequest {
        title: req.title,
        event_type: req.event_type,
        start: req.start,
        end: req.end,
        expected_volunteers: req.expected_volunteers,
        parent_event_id: req.parent_event_id,
    };

    let mut engine = app_state.engine.lock().await;
    let event: EventInfo = create_event(&mut engine, &request, &actor)?;
    drop(engine);

    info!(event_id = event.event_id, "Successfully created event");
    Ok(Json(event))
}

/// Handler for GET `/events/{event_id}` endpoint.
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Query(query): Query<ActorFields>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(event_id, actor_id = %query.actor_id, "Handling get_event request");
    let actor: AuthenticatedActor = authenticate(&query)?;

    let mut engine = app_state.engine.lock().await;
    let event: EventInfo = get_event(&mut engine, event_id, &actor)?;
    drop(engine);
    Ok(Json(event))
}

/// Handler for POST `/events/{event_id}/check` endpoint.
///
/// Re-evaluates the event immediately.
async fn handle_check_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Json(req): Json<ActorFields>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(event_id, actor_id = %req.actor_id, "Handling check_event request");
    let actor: AuthenticatedActor = authenticate(&req)?;

    let mut engine = app_state.engine.lock().await;
    let event: EventInfo = check_event_status(&mut engine, event_id, &actor)?;
    drop(engine);
    Ok(Json(event))
}

/// Handler for POST `/events/{event_id}/status` endpoint.
///
/// Applies a manual status override.
async fn handle_change_status(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Json(req): Json<ChangeStatusApiRequest>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(
        event_id,
        actor_id = %req.actor.actor_id,
        status = %req.status,
        "Handling change_status request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor)?;

    let request: ChangeEventStatusRequest = ChangeEventStatusRequest {
        status: req.status,
        reason: req.reason,
    };

    let mut engine = app_state.engine.lock().await;
    let event: EventInfo = change_event_status(&mut engine, event_id, &request, &actor)?;
    drop(engine);

    info!(event_id, status = %event.status, "Status overridden");
    Ok(Json(event))
}

/// Handler for POST `/events/{event_id}/volunteers` endpoint.
async fn handle_register_volunteer(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Json(req): Json<RegisterVolunteerApiRequest>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(
        event_id,
        volunteer_id = req.volunteer_id,
        actor_id = %req.actor.actor_id,
        "Handling register_volunteer request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor)?;

    let mut engine = app_state.engine.lock().await;
    let event: EventInfo = register_volunteer(
        &mut engine,
        event_id,
        VolunteerRequest {
            volunteer_id: req.volunteer_id,
        },
        &actor,
    )?;
    drop(engine);
    Ok(Json(event))
}

/// Handler for DELETE `/events/{event_id}/volunteers/{volunteer_id}` endpoint.
async fn handle_unregister_volunteer(
    AxumState(app_state): AxumState<AppState>,
    Path((event_id, volunteer_id)): Path<(i64, i64)>,
    Query(query): Query<ActorFields>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(
        event_id,
        volunteer_id,
        actor_id = %query.actor_id,
        "Handling unregister_volunteer request"
    );
    let actor: AuthenticatedActor = authenticate(&query)?;

    let mut engine = app_state.engine.lock().await;
    let event: EventInfo = unregister_volunteer(
        &mut engine,
        event_id,
        VolunteerRequest { volunteer_id },
        &actor,
    )?;
    drop(engine);
    Ok(Json(event))
}

/// Handler for POST `/events/{event_id}/merchants` endpoint.
async fn handle_attach_donation(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Json(req): Json<AttachDonationApiRequest>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(
        event_id,
        merchant_id = req.merchant_id,
        actor_id = %req.actor.actor_id,
        "Handling attach_donation request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor)?;

    let request: AttachDonationRequest = AttachDonationRequest {
        merchant_id: req.merchant_id,
        note: req.note,
    };

    let mut engine = app_state.engine.lock().await;
    let event: EventInfo = attach_merchant_donation(&mut engine, event_id, &request, &actor)?;
    drop(engine);
    Ok(Json(event))
}

/// Handler for POST `/status/sweep` endpoint.
async fn handle_sweep(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorFields>,
) -> Result<Json<SweepResponse>, HttpError> {
    info!(actor_id = %req.actor_id, "Handling sweep request");
    let actor: AuthenticatedActor = authenticate(&req)?;

    let mut engine = app_state.engine.lock().await;
    let response: SweepResponse = sweep(&mut engine, &actor)?;
    drop(engine);
    Ok(Json(response))
}

/// Handler for GET `/status/finishable` endpoint.
async fn handle_list_finishable(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorFields>,
) -> Result<Json<ListFinishableResponse>, HttpError> {
    info!(actor_id = %query.actor_id, "Handling list_finishable request");
    let actor: AuthenticatedActor = authenticate(&query)?;

    let mut engine = app_state.engine.lock().await;
    let response: ListFinishableResponse = list_finishable(&mut engine, &actor)?;
    drop(engine);
    Ok(Json(response))
}

/// Handler for POST `/status/backfill` endpoint.
async fn handle_backfill(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorFields>,
) -> Result<Json<BackfillResponse>, HttpError> {
    info!(actor_id = %req.actor_id, "Handling backfill request");
    let actor: AuthenticatedActor = authenticate(&req)?;

    let mut engine = app_state.engine.lock().await;
    let response: BackfillResponse = backfill_status_history(&mut engine, &actor)?;
    drop(engine);

    info!(backfilled = response.backfilled, "Backfill completed");
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/events", post(handle_create_event))
        .route("/events/{event_id}", get(handle_get_event))
        .route("/events/{event_id}/check", post(handle_check_event))
        .route("/events/{event_id}/status", post(handle_change_status))
        .route("/events/{event_id}/volunteers", post(handle_register_volunteer))
        .route(
            "/events/{event_id}/volunteers/{volunteer_id}",
            delete(handle_unregister_volunteer),
        )
        .route("/events/{event_id}/merchants", post(handle_attach_donation))
        .route("/status/sweep", post(handle_sweep))
        .route("/status/finishable", get(handle_list_finishable))
        .route("/status/backfill", post(handle_backfill))
        .with_state(app_state)
}

/// Opens the configured database.
fn open_persistence(args: &Args) -> Result<Persistence, PersistenceError> {
    if let Some(url) = &args.mysql_url {
        info!("Using MariaDB/MySQL database");
        Persistence::new_with_mysql(url)
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Gleaner Server");

    let persistence: Persistence = open_persistence(&args)?;
    let engine: SharedEngine = Arc::new(Mutex::new(StatusEngine::new(persistence, SystemClock)));

    if args.sweep_interval_secs == 0 {
        info!("Scheduled sweep disabled");
    } else {
        info!(
            interval_secs = args.sweep_interval_secs,
            "Starting scheduled sweep"
        );
        spawn_sweep_scheduler(
            Arc::clone(&engine),
            std::time::Duration::from_secs(args.sweep_interval_secs),
        );
    }

    let app: Router = build_router(AppState { engine });

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
