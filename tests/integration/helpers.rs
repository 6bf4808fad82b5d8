//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use seatlock_api::{AppState, build_router};
use seatlock_core::config::AppConfig;
use seatlock_core::traits::ManualClock;
use seatlock_engine::ReservationService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Clock driving every claim deadline
    pub clock: ManualClock,
    /// Direct handle to the service behind the router
    pub reservations: Arc<ReservationService>,
}

impl TestApp {
    /// Create a test application with the default 3x5 venue
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application from an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let clock = ManualClock::new(epoch());
        let layout = config.venue.layout().expect("Invalid test layout");
        let reservations = Arc::new(ReservationService::with_clock(
            &layout,
            config.reservation.clone(),
            Arc::new(clock.clone()),
        ));

        let state = AppState::new(Arc::new(config), Arc::clone(&reservations));

        Self {
            router: build_router(state),
            clock,
            reservations,
        }
    }

    /// Advance the shared clock
    pub fn advance(&self, seconds: i64) {
        self.clock.advance(Duration::seconds(seconds));
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Lock seats and return the token, asserting success
    pub async fn lock(&self, seat_ids: &[&str], ttl_seconds: u64) -> String {
        let response = self
            .request(
                "POST",
                "/api/seats/lock",
                Some(serde_json::json!({ "seatIds": seat_ids, "ttlSeconds": ttl_seconds })),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Lock failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in lock response")
            .to_string()
    }

    /// Fetch the status string of one seat
    pub async fn seat_status(&self, seat_id: &str) -> String {
        let response = self
            .request("GET", &format!("/api/seats/{seat_id}"), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["data"]["status"]
            .as_str()
            .expect("No status in seat response")
            .to_string()
    }
}

/// Fixed start instant for every test clock
pub fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// `(id, reason)` pairs from a rejected lock/confirm body
    pub fn failed_resources(&self) -> Vec<(String, String)> {
        self.body["failedResources"]
            .as_array()
            .expect("No failedResources in body")
            .iter()
            .map(|f| {
                (
                    f["id"].as_str().unwrap_or_default().to_string(),
                    f["reason"].as_str().unwrap_or_default().to_string(),
                )
            })
            .collect()
    }
}
