use crate::infra::{AppState, ExportGuard};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Local;
use qap_score::scoring::location::reference;
use qap_score::scoring::location::LocationUpdate;
use qap_score::scoring::report::{ReportError, ScoreReport};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

pub(crate) fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/reference/states", get(states_endpoint))
        .route(
            "/api/v1/reference/states/:state/cities",
            get(cities_endpoint),
        )
        .route(
            "/api/v1/reference/states/:state/cities/:city/zip-codes",
            get(zip_codes_endpoint),
        )
        .route("/api/v1/session", get(session_endpoint))
        .route("/api/v1/session/location", put(location_endpoint))
        .route("/api/v1/session/radius", put(radius_endpoint))
        .route("/api/v1/session/scores/:category_id", put(score_endpoint))
        .route("/api/v1/session/report", post(export_endpoint))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RadiusRequest {
    pub(crate) radius_km: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) points: i32,
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn states_endpoint() -> Json<Vec<&'static str>> {
    Json(reference::state_options())
}

/// Unknown states answer with an empty list rather than an error.
pub(crate) async fn cities_endpoint(Path(state): Path<String>) -> Json<Vec<&'static str>> {
    Json(reference::city_options(&state))
}

pub(crate) async fn zip_codes_endpoint(
    Path((state, city)): Path<(String, String)>,
) -> Json<Vec<&'static str>> {
    Json(reference::zip_code_options(&state, &city))
}

pub(crate) async fn session_endpoint(State(state): State<AppState>) -> Response {
    let session = state.session.lock().expect("session mutex poisoned");
    (StatusCode::OK, Json(session.snapshot())).into_response()
}

pub(crate) async fn location_endpoint(
    State(state): State<AppState>,
    Json(update): Json<LocationUpdate>,
) -> Response {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session.set_location(update);
    (StatusCode::OK, Json(session.snapshot())).into_response()
}

pub(crate) async fn radius_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<RadiusRequest>,
) -> Response {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session.set_radius(payload.radius_km);
    (StatusCode::OK, Json(session.snapshot())).into_response()
}

/// Unknown category ids are silently ignored; the snapshot simply comes back
/// unchanged.
pub(crate) async fn score_endpoint(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(payload): Json<ScoreRequest>,
) -> Response {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session.set_category_points(&category_id, payload.points);
    (StatusCode::OK, Json(session.snapshot())).into_response()
}

pub(crate) async fn export_endpoint(State(state): State<AppState>) -> Response {
    let Some(_guard) = ExportGuard::acquire(state.exporting.clone()) else {
        let payload = json!({ "error": "a report export is already running" });
        return (StatusCode::CONFLICT, Json(payload)).into_response();
    };

    let snapshot = {
        let session = state.session.lock().expect("session mutex poisoned");
        session.snapshot()
    };

    let report = match ScoreReport::from_snapshot(snapshot, Local::now()) {
        Ok(report) => report,
        Err(err @ ReportError::NoStateSelected) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
        Err(err) => {
            error!(%err, "report build failed");
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
        }
    };

    match report.write_to(&state.export_dir) {
        Ok(path) => {
            let payload = json!({ "file": path.display().to_string() });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(err) => {
            error!(%err, "report export failed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use qap_score::scoring::session::QapSession;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_router() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = AppState::for_tests(QapSession::seeded(404), dir.path().to_path_buf());
        (app_router(state), dir)
    }

    async fn read_json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("valid json body")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn put_json(uri: &str, payload: Value) -> Request<Body> {
        Request::put(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_and_ready_respond_ok() {
        let (router, _dir) = test_router();
        let response = router.clone().oneshot(get("/health")).await.expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router.oneshot(get("/ready")).await.expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn reference_endpoints_mirror_static_tables() {
        let (router, _dir) = test_router();

        let response = router
            .clone()
            .oneshot(get("/api/v1/reference/states"))
            .await
            .expect("route executes");
        assert_eq!(read_json_body(response).await, json!(["Texas", "California"]));

        let response = router
            .clone()
            .oneshot(get("/api/v1/reference/states/Texas/cities/Austin/zip-codes"))
            .await
            .expect("route executes");
        assert_eq!(
            read_json_body(response).await,
            json!(["78701", "78702", "78703", "78704", "78705"])
        );

        let response = router
            .oneshot(get("/api/v1/reference/states/Iowa/cities"))
            .await
            .expect("route executes");
        assert_eq!(read_json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn location_updates_cascade_and_swap_templates() {
        let (router, _dir) = test_router();

        let response = router
            .clone()
            .oneshot(put_json(
                "/api/v1/session/location",
                json!({ "state": "Texas", "city": "Austin", "zip_code": "78701" }),
            ))
            .await
            .expect("route executes");
        let body = read_json_body(response).await;
        assert_eq!(body["state"], "Texas");
        assert_eq!(body["total_max_points"], 104);
        assert!(body["amenities"].as_array().map(|a| !a.is_empty()).unwrap_or(false));

        let response = router
            .oneshot(put_json(
                "/api/v1/session/location",
                json!({ "state": "California" }),
            ))
            .await
            .expect("route executes");
        let body = read_json_body(response).await;
        assert_eq!(body["total_max_points"], 81);
        assert_eq!(body["total_score"], 0);
        assert_eq!(body["location"]["city"], Value::Null);
    }

    #[tokio::test]
    async fn score_updates_clamp_and_ignore_unknown_ids() {
        let (router, _dir) = test_router();

        let response = router
            .clone()
            .oneshot(put_json(
                "/api/v1/session/scores/financial",
                json!({ "points": 999 }),
            ))
            .await
            .expect("route executes");
        let body = read_json_body(response).await;
        let financial = body["categories"]
            .as_array()
            .and_then(|categories| {
                categories
                    .iter()
                    .find(|category| category["id"] == "financial")
            })
            .cloned()
            .expect("financial category present");
        assert_eq!(financial["current_points"], 14);

        let response = router
            .oneshot(put_json(
                "/api/v1/session/scores/parking",
                json!({ "points": 5 }),
            ))
            .await
            .expect("route executes");
        let body = read_json_body(response).await;
        assert_eq!(body["total_score"], 14);
    }

    #[tokio::test]
    async fn radius_updates_are_clamped() {
        let (router, _dir) = test_router();

        let response = router
            .oneshot(put_json("/api/v1/session/radius", json!({ "radius_km": 99.0 })))
            .await
            .expect("route executes");
        let body = read_json_body(response).await;
        assert_eq!(body["radius_km"], 10.0);
    }

    #[tokio::test]
    async fn export_without_state_is_rejected() {
        let (router, _dir) = test_router();

        let response = router
            .oneshot(
                Request::post("/api/v1/session/report")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json_body(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("select a state"));
    }

    #[tokio::test]
    async fn export_writes_a_report_file() {
        let (router, dir) = test_router();

        router
            .clone()
            .oneshot(put_json(
                "/api/v1/session/location",
                json!({ "state": "Texas", "city": "Austin" }),
            ))
            .await
            .expect("route executes");

        let response = router
            .oneshot(
                Request::post("/api/v1/session/report")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json_body(response).await;
        let file = body["file"].as_str().expect("file path returned");
        assert!(file.starts_with(dir.path().to_str().unwrap()));
        assert!(std::path::Path::new(file).exists());
    }

    #[tokio::test]
    async fn concurrent_export_is_rejected_while_busy() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = AppState::for_tests(QapSession::seeded(404), dir.path().to_path_buf());
        let router = app_router(state.clone());

        let _guard = ExportGuard::acquire(state.exporting.clone()).expect("flag free");
        let response = router
            .oneshot(
                Request::post("/api/v1/session/report")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
