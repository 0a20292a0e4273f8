// Integration tests for the adaptation services and dashboard
// aggregation, using wiremock. Read paths degrade to empty; write paths
// surface errors with user-facing messages.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fleetdeck_api::ApiClient;
use fleetdeck_core::dashboard::DashboardService;
use fleetdeck_core::model::{DashboardMetrics, UiSeverity, VehicleStatus};
use fleetdeck_core::services::{NewVehicle, VehicleService};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Arc<ApiClient>) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, Arc::new(client))
}

// ── Read paths degrade, write paths surface ─────────────────────────

#[tokio::test]
async fn test_vehicle_list_failure_degrades_to_empty() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let vehicles = VehicleService::new(api).get_all().await;
    assert!(vehicles.is_empty());
}

#[tokio::test]
async fn test_vehicle_create_failure_rethrows_with_message() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/vehicles"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "VIN already exists" })),
        )
        .mount(&server)
        .await;

    let result = VehicleService::new(api)
        .create(&NewVehicle {
            model: "Volvo FH16".into(),
            mileage: 0,
        })
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.user_message(), "VIN already exists");
}

#[tokio::test]
async fn test_write_failure_without_body_uses_status_table() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = VehicleService::new(api)
        .create(&NewVehicle {
            model: "Volvo FH16".into(),
            mileage: 0,
        })
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.user_message(), "Server error. Please try again later.");
}

#[tokio::test]
async fn test_vehicle_list_maps_statuses() {
    let (server, api) = setup().await;

    let body = json!([
        { "id": "v-1", "make": "Volvo", "model": "FH16", "status": "InUse" },
        { "id": "v-2", "make": "Scania", "model": "R500", "status": "Maintenance" },
        { "id": "v-3", "make": "MAN", "model": "TGX", "status": "SomethingNew" }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let vehicles = VehicleService::new(api).get_all().await;
    assert_eq!(vehicles.len(), 3);
    assert_eq!(vehicles[0].status, VehicleStatus::Assigned);
    assert_eq!(vehicles[1].status, VehicleStatus::InMaintenance);
    assert_eq!(vehicles[2].status, VehicleStatus::Available);
    assert_eq!(vehicles[0].model, "Volvo FH16");
}

// ── Dashboard aggregation ───────────────────────────────────────────

#[tokio::test]
async fn test_metrics_counts_by_wire_status() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "v-1", "status": "Available" },
            { "id": "v-2", "status": "InUse" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "d-1", "status": "OnDuty" },
            { "id": "d-2", "status": "OffDuty" },
            { "id": "d-3", "status": "OnDuty" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "as-1", "status": "Active" },
            { "id": "as-2", "status": "Completed" },
            { "id": "as-3", "status": "Completed" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/maintenance/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a-1", "severity": "Critical" },
            { "id": "a-2", "severity": "Low" },
        ])))
        .mount(&server)
        .await;

    let metrics = DashboardService::new(api).get_metrics().await;

    assert_eq!(metrics.total_vehicles, 2);
    assert_eq!(metrics.available_vehicles, 1);
    assert_eq!(metrics.total_drivers, 3);
    assert_eq!(metrics.on_duty_drivers, 2);
    assert_eq!(metrics.active_assignments, 1);
    assert_eq!(metrics.completed_assignments, 2);
    assert_eq!(metrics.open_alerts, 1);
    assert_eq!(metrics.severe_alerts, 1);
}

#[tokio::test]
async fn test_metrics_zeroed_when_any_fetch_fails() {
    let (server, api) = setup().await;

    for route in ["/api/vehicles", "/api/drivers", "/api/assignments"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/maintenance/alerts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let metrics = DashboardService::new(api).get_metrics().await;
    assert_eq!(metrics, DashboardMetrics::zeroed());
}

#[tokio::test]
async fn test_dashboard_alerts_map_to_ui_severities() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/maintenance/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a-1", "severity": "Critical", "type": "Engine", "entity_id": "v-1" },
            { "id": "a-2", "severity": "Medium" },
            { "id": "a-3", "severity": "Low" },
        ])))
        .mount(&server)
        .await;

    let alerts = DashboardService::new(api).get_alerts().await;

    assert_eq!(alerts.len(), 3);
    assert_eq!(alerts[0].severity, UiSeverity::High);
    assert_eq!(alerts[1].severity, UiSeverity::Medium);
    assert_eq!(alerts[2].severity, UiSeverity::Low);
    assert_eq!(alerts[0].message, "Engine for v-1");
    assert_eq!(alerts[1].message, "Alert for unknown entity");
}

#[tokio::test]
async fn test_recent_assignments_join_names_and_infer_progress() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "as-1", "vehicle_id": "v-1", "driver_id": "d-1", "status": "Completed" },
            { "id": "as-2", "vehicle_id": "v-2", "driver_id": "d-9", "status": "Active" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "v-1", "license_plate": "TRK-001", "model": "FH16" },
            { "id": "v-2", "model": "R500" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "d-1", "name": "Ana Ruiz" },
        ])))
        .mount(&server)
        .await;

    let recent = DashboardService::new(api).get_recent_assignments().await;

    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].vehicle_name.as_deref(), Some("TRK-001"));
    assert_eq!(recent[0].driver_name.as_deref(), Some("Ana Ruiz"));
    assert_eq!(recent[0].progress, 100);
    // Plate missing: model stands in. Unknown driver: raw id.
    assert_eq!(recent[1].vehicle_name.as_deref(), Some("R500"));
    assert_eq!(recent[1].driver_name.as_deref(), Some("d-9"));
    assert_eq!(recent[1].progress, 50);
    assert_eq!(recent[1].location, "—");
}
