// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::*;
use crate::scheduler::{SCHEDULED_SWEEP_ACTOR, run_scheduled_sweep};
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use time::Duration;
use time::macros::datetime;
use tower::ServiceExt;

const FUTURE_START: OffsetDateTime = datetime!(2099-06-13 10:00 UTC);
const FUTURE_END: OffsetDateTime = datetime!(2099-06-13 14:00 UTC);

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        engine: Arc::new(Mutex::new(StatusEngine::new(persistence, SystemClock))),
    }
}

fn actor(actor_id: &str, actor_role: &str) -> ActorFields {
    ActorFields {
        actor_id: actor_id.to_string(),
        actor_role: actor_role.to_string(),
    }
}

fn admin() -> ActorFields {
    actor("admin1", "administrator")
}

fn create_event_request(
    event_type: &str,
    expected_volunteers: i64,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> CreateEventApiRequest {
    CreateEventApiRequest {
        actor: admin(),
        title: String::from("Neighborhood food drive"),
        event_type: event_type.to_string(),
        start,
        end,
        expected_volunteers,
        parent_event_id: None,
    }
}

fn json_request<T: Serialize>(method: &str, uri: &str, body: &T) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (HttpStatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body_bytes.to_vec())
}

async fn create_test_event(app: &Router, request: &CreateEventApiRequest) -> EventInfo {
    let (status, body) = send(app, json_request("POST", "/events", request)).await;
    assert_eq!(status, HttpStatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_create_event_as_admin_succeeds() {
    let app: Router = build_router(create_test_app_state());

    let event: EventInfo = create_test_event(
        &app,
        &create_event_request("collection", 2, FUTURE_START, FUTURE_END),
    )
    .await;

    assert!(event.event_id > 0);
    assert_eq!(event.status, "incomplete");
    assert_eq!(event.start, FUTURE_START);
    assert_eq!(event.status_history.len(), 1);
    assert_eq!(event.status_history[0].reason, "initial");
}

#[tokio::test]
async fn test_create_event_as_volunteer_is_forbidden() {
    let app: Router = build_router(create_test_app_state());
    let mut request = create_event_request("market", 2, FUTURE_START, FUTURE_END);
    request.actor = actor("7", "volunteer");

    let (status, body) = send(&app, json_request("POST", "/events", &request)).await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error);
    assert!(error.message.contains("create_event"));
}

#[tokio::test]
async fn test_unknown_role_is_unauthenticated() {
    let app: Router = build_router(create_test_app_state());
    let mut request = create_event_request("market", 2, FUTURE_START, FUTURE_END);
    request.actor = actor("x", "beneficiary");

    let (status, _) = send(&app, json_request("POST", "/events", &request)).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_event_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let request = create_event_request("market", 0, FUTURE_START, FUTURE_END);

    let (status, _) = send(&app, json_request("POST", "/events", &request)).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_event_is_not_found() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        empty_request("GET", "/events/404?actor_id=admin1&actor_role=administrator"),
    )
    .await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_volunteer_registration_round_trip() {
    let app: Router = build_router(create_test_app_state());
    let event = create_test_event(
        &app,
        &create_event_request("market", 1, FUTURE_START, FUTURE_END),
    )
    .await;

    let register = RegisterVolunteerApiRequest {
        actor: actor("5", "volunteer"),
        volunteer_id: 5,
    };
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/events/{}/volunteers", event.event_id),
            &register,
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let registered: EventInfo = serde_json::from_slice(&body).unwrap();
    assert_eq!(registered.status, "ready");
    assert_eq!(registered.volunteers, vec![5]);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/events/{}/volunteers", event.event_id),
            &register,
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        empty_request(
            "DELETE",
            &format!(
                "/events/{}/volunteers/5?actor_id=5&actor_role=volunteer",
                event.event_id
            ),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let withdrawn: EventInfo = serde_json::from_slice(&body).unwrap();
    assert_eq!(withdrawn.status, "incomplete");
    assert!(withdrawn.volunteers.is_empty());
}

#[tokio::test]
async fn test_merchant_donation_endpoint() {
    let app: Router = build_router(create_test_app_state());
    let event = create_test_event(
        &app,
        &create_event_request("collection", 1, FUTURE_START, FUTURE_END),
    )
    .await;

    let donation = AttachDonationApiRequest {
        actor: actor("8", "merchant"),
        merchant_id: 8,
        note: Some(String::from("fresh bread")),
    };
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/events/{}/merchants", event.event_id),
            &donation,
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    let updated: EventInfo = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.merchants, vec![8]);
    assert_eq!(updated.status, "incomplete");
}

#[tokio::test]
async fn test_change_status_endpoint() {
    let app: Router = build_router(create_test_app_state());
    let event = create_test_event(
        &app,
        &create_event_request("meeting", 1, FUTURE_START, FUTURE_END),
    )
    .await;
    let uri = format!("/events/{}/status", event.event_id);

    let finish = ChangeStatusApiRequest {
        actor: admin(),
        status: String::from("finished"),
        reason: None,
    };
    let (status, _) = send(&app, json_request("POST", &uri, &finish)).await;
    assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);

    let unknown = ChangeStatusApiRequest {
        actor: admin(),
        status: String::from("archived"),
        reason: None,
    };
    let (status, _) = send(&app, json_request("POST", &uri, &unknown)).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);

    let cancel = ChangeStatusApiRequest {
        actor: admin(),
        status: String::from("cancelled"),
        reason: Some(String::from("storm warning")),
    };
    let (status, body) = send(&app, json_request("POST", &uri, &cancel)).await;
    assert_eq!(status, HttpStatusCode::OK);
    let cancelled: EventInfo = serde_json::from_slice(&body).unwrap();
    assert_eq!(cancelled.status, "cancelled");
    assert_eq!(
        cancelled.status_history.last().unwrap().changed_by.as_deref(),
        Some("administrator:admin1")
    );
}

#[tokio::test]
async fn test_check_endpoint_evaluates_event() {
    let app: Router = build_router(create_test_app_state());
    let event = create_test_event(
        &app,
        &create_event_request("training", 3, FUTURE_START, FUTURE_END),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/events/{}/check", event.event_id),
            &actor("3", "volunteer"),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    let checked: EventInfo = serde_json::from_slice(&body).unwrap();
    assert_eq!(checked.status, "ready");
}

#[tokio::test]
async fn test_sweep_finishable_and_backfill_endpoints() {
    let app: Router = build_router(create_test_app_state());
    let now = OffsetDateTime::now_utc();
    let running = create_test_event(
        &app,
        &create_event_request("meeting", 1, now - Duration::hours(1), now + Duration::hours(1)),
    )
    .await;
    let ended = create_test_event(
        &app,
        &create_event_request("market", 2, now - Duration::hours(3), now - Duration::hours(2)),
    )
    .await;

    let (status, body) = send(&app, json_request("POST", "/status/sweep", &admin())).await;
    assert_eq!(status, HttpStatusCode::OK);
    let report: SweepResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(report.examined, 1);
    assert_eq!(report.changed, 1);

    let (status, body) = send(
        &app,
        empty_request(
            "GET",
            "/status/finishable?actor_id=admin1&actor_role=administrator",
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let finishable: ListFinishableResponse = serde_json::from_slice(&body).unwrap();
    let ids: Vec<i64> = finishable.events.iter().map(|e| e.event_id).collect();
    assert_eq!(ids, vec![ended.event_id]);
    assert_ne!(ended.event_id, running.event_id);

    let (status, body) = send(&app, json_request("POST", "/status/backfill", &admin())).await;
    assert_eq!(status, HttpStatusCode::OK);
    let backfill: BackfillResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(backfill.backfilled, 0);

    let (status, _) = send(
        &app,
        json_request("POST", "/status/sweep", &actor("1", "volunteer")),
    )
    .await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_scheduled_sweep_records_system_actor() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    let now = OffsetDateTime::now_utc();
    let event = create_test_event(
        &app,
        &create_event_request("meeting", 1, now - Duration::minutes(5), now + Duration::hours(2)),
    )
    .await;

    let report = run_scheduled_sweep(&app_state.engine).await.unwrap();

    assert_eq!(report.changed, 1);
    let (_, body) = send(
        &app,
        empty_request(
            "GET",
            &format!(
                "/events/{}?actor_id=admin1&actor_role=administrator",
                event.event_id
            ),
        ),
    )
    .await;
    let swept: EventInfo = serde_json::from_slice(&body).unwrap();
    assert_eq!(swept.status, "in_progress");
    assert_eq!(
        swept.status_history.last().unwrap().changed_by,
        Some(format!("system:{SCHEDULED_SWEEP_ACTOR}"))
    );
}

#[test]
fn test_api_errors_map_to_status_codes() {
    let cases = [
        (
            ApiError::Conflict {
                message: String::from("stale"),
            },
            HttpStatusCode::CONFLICT,
        ),
        (
            ApiError::Internal {
                message: String::from("disk full"),
            },
            HttpStatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            ApiError::ResourceNotFound {
                resource_type: String::from("Event"),
                message: String::from("Event 1 does not exist"),
            },
            HttpStatusCode::NOT_FOUND,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(HttpError::from(err).status, expected);
    }
}

#[test]
fn test_args_defaults_and_conflicts() {
    let args = Args::try_parse_from(["gleaner-server"]).unwrap();
    assert_eq!(args.port, 3000);
    assert_eq!(args.sweep_interval_secs, 3600);
    assert_eq!(args.host, "127.0.0.1");

    let both = Args::try_parse_from([
        "gleaner-server",
        "--database",
        "events.db",
        "--mysql-url",
        "mysql://localhost/gleaner",
    ]);
    assert!(both.is_err());
}
