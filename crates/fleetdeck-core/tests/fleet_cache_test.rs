// Integration tests for the Fleet facade's cache invalidation rules,
// using wiremock expectations to count refetches.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fleetdeck_api::ApiClient;
use fleetdeck_core::model::DriverAvailability;
use fleetdeck_core::services::{DriverUpdate, NewAssignment, NewDriver};
use fleetdeck_core::session::{MemorySessionStore, SessionContext};
use fleetdeck_core::{Fleet, QueryKey};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Fleet) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    let session = SessionContext::init(Arc::new(MemorySessionStore::new())).unwrap();
    (server, Fleet::new(client, session))
}

fn driver_body(id: &str) -> serde_json::Value {
    json!({ "id": id, "name": "Ana Ruiz", "status": "Available", "license_number": "DL-12345" })
}

fn update_input() -> DriverUpdate {
    DriverUpdate {
        availability: DriverAvailability::Available,
        license: Some("DL-12345".into()),
        license_expiry: None,
        hours_this_week: 0,
        wage_rate: 25.0,
        phone: None,
        email: None,
    }
}

// ── Invalidation rules ──────────────────────────────────────────────

#[tokio::test]
async fn test_driver_update_invalidates_list_and_item() {
    let (server, fleet) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([driver_body("d-1")])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/drivers/d-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(driver_body("d-1")))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/drivers/d-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(driver_body("d-1")))
        .expect(1)
        .mount(&server)
        .await;

    // Warm both entries, then confirm they are served from cache.
    fleet.drivers_cached().await;
    fleet.driver("d-1").await.unwrap();
    fleet.drivers_cached().await;
    fleet.driver("d-1").await.unwrap();

    fleet.update_driver("d-1", &update_input()).await.unwrap();

    // Both entries are stale now; each read refetches once.
    fleet.drivers_cached().await;
    fleet.driver("d-1").await.unwrap();
}

#[tokio::test]
async fn test_driver_create_invalidates_only_the_list() {
    let (server, fleet) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([driver_body("d-1")])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/drivers/d-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(driver_body("d-1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/drivers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(driver_body("d-2")))
        .expect(1)
        .mount(&server)
        .await;

    fleet.drivers_cached().await;
    fleet.driver("d-1").await.unwrap();

    fleet
        .create_driver(&NewDriver {
            user_id: "u-2".into(),
            availability: DriverAvailability::Available,
            license: "DL-67890".into(),
            license_expiry: "2026-01-01".into(),
            hours_this_week: 0,
            wage_rate: 25.0,
            phone: "555-0100".into(),
            email: "new@example.com".into(),
        })
        .await
        .unwrap();

    // The list is stale and refetches; the cached single driver is not.
    fleet.drivers_cached().await;
    fleet.driver("d-1").await.unwrap();
}

#[tokio::test]
async fn test_assignment_create_invalidates_filtered_entries() {
    let (server, fleet) = setup().await;

    let assignment = json!({
        "id": "as-1", "vehicle_id": "v-1", "driver_id": "d-1",
        "status": "Scheduled", "start_time": "2025-06-15T10:30:00+00:00"
    });

    Mock::given(method("GET"))
        .and(path("/api/assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([assignment])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/assignments/driver/d-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([assignment])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/assignments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&assignment))
        .expect(1)
        .mount(&server)
        .await;

    // Warm the filtered entries, then confirm they are served from cache.
    fleet.assignments_by_vehicle("v-1").await;
    fleet.driver_assignments("d-1").await;
    fleet.assignments_by_vehicle("v-1").await;
    fleet.driver_assignments("d-1").await;

    fleet
        .create_assignment(&NewAssignment {
            vehicle_id: "v-1".into(),
            driver_id: "d-1".into(),
            start_date: "2025-06-15T10:30".into(),
            end_date: None,
        })
        .await
        .unwrap();

    // Both the by-vehicle entry and the driver history are stale now.
    fleet.assignments_by_vehicle("v-1").await;
    fleet.driver_assignments("d-1").await;
}

#[tokio::test]
async fn test_settings_fetch_syncs_preferences() {
    let (server, fleet) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "company_name": "Fleetdeck Inc",
            "contact_email": "ops@example.com",
            "phone_number": "555-0100",
            "time_zone": "UTC",
            "address": "1 Depot Way",
            "distance_unit": "Kilometers",
            "currency": "Euro (€)",
            "date_format": "YYYY-MM-DD",
            "notify_maintenance_alerts": true,
            "notify_license_expiry": true,
            "notify_service_completion": false,
            "notify_payment": false,
            "notify_sms": false,
            "notify_desktop": true,
            "notify_weekly_summary": false
        })))
        .mount(&server)
        .await;

    fleet.settings_cached().await.unwrap();

    let prefs = fleet.session().preferences();
    assert_eq!(prefs.currency, "Euro (€)");
    assert_eq!(prefs.distance_unit.to_string(), "Kilometers");
    assert_eq!(prefs.date_format.to_string(), "YYYY-MM-DD");
}

#[tokio::test]
async fn test_logout_clears_cache_and_session() {
    let (server, fleet) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([driver_body("d-1")])))
        .expect(2)
        .mount(&server)
        .await;

    fleet.drivers_cached().await;
    fleet.logout().unwrap();
    assert!(!fleet.session().is_authenticated());

    // Cache was emptied, so the next read refetches.
    fleet.drivers_cached().await;
}

#[tokio::test]
async fn test_alert_poller_runs_after_a_logout() {
    let (server, fleet) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/maintenance/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    fleet.logout().unwrap();

    // A poller spawned after logout must get a live token; its first
    // tick fires immediately and fills the alerts entry.
    let handle = fleet.spawn_alert_poller();
    for _ in 0..50 {
        if fleet.cache().fetched_at(&QueryKey::Alerts).is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(fleet.cache().fetched_at(&QueryKey::Alerts).is_some());

    fleet.shutdown();
    handle.await.unwrap();
}
