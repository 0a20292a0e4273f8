// Wire DTOs for the Fleetdeck backend REST API.
//
// Field names follow the backend's snake_case wire casing; optionality
// mirrors the OpenAPI schema. Status and severity fields cross the wire
// as raw strings -- narrowing into domain enums happens in
// `fleetdeck-core`, never here.

use serde::{Deserialize, Serialize};

// ── Vehicles ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleDto {
    pub id: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub current_mileage: Option<i64>,
    pub last_service_date: Option<String>,
    pub fuel_type: Option<String>,
    pub specs: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateVehicleDto {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub license_plate: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub current_mileage: i64,
    pub fuel_type: String,
    pub specs: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateVehicleDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ── Drivers ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct DriverDto {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<String>,
    pub status: Option<String>,
    pub wage_rate: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateDriverDto {
    pub user_id: String,
    pub status: String,
    pub license_number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateDriverDto {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
}

// ── Assignments ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentDto {
    pub id: Option<String>,
    pub vehicle_id: Option<String>,
    pub driver_id: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAssignmentDto {
    pub vehicle_id: String,
    pub driver_id: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateAssignmentDto {
    pub status: String,
}

// ── Maintenance ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AlertDto {
    pub id: Option<String>,
    pub entity_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
    pub severity: Option<String>,
    pub is_resolved: Option<bool>,
    pub created_at: Option<String>,
    pub resolved_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAlertDto {
    pub entity_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceRecordDto {
    pub id: Option<String>,
    pub vehicle_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Decimal serialized as a string on the wire.
    pub cost: Option<String>,
    pub date: Option<String>,
    pub provider: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMaintenanceRecordDto {
    pub vehicle_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub cost: String,
    pub date: String,
    pub provider: String,
    pub description: Option<String>,
}

// ── Financial ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlySummaryDto {
    pub month: Option<String>,
    pub revenue: Option<String>,
    pub cost: Option<String>,
    pub profit: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleProfitabilityDto {
    pub vehicle_id: Option<String>,
    pub vehicle_plate: Option<String>,
    pub revenue: Option<String>,
    pub cost: Option<String>,
    pub profit: Option<String>,
    pub rank: Option<i32>,
}

// ── Auth & users ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Option<UserDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserDto {
    pub email: String,
    pub password: String,
    pub role: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserDto {
    pub role: String,
    pub is_active: bool,
}

// ── Settings ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettingsDto {
    pub id: i64,
    pub company_name: String,
    pub contact_email: String,
    pub phone_number: String,
    pub time_zone: String,
    pub address: String,
    pub distance_unit: String,
    pub currency: String,
    pub date_format: String,
    pub notify_maintenance_alerts: bool,
    pub notify_license_expiry: bool,
    pub notify_service_completion: bool,
    pub notify_payment: bool,
    pub notify_sms: bool,
    pub notify_desktop: bool,
    pub notify_weekly_summary: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Settings are replaced wholesale via PUT -- same shape minus the
/// server-managed fields.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAppSettingsDto {
    pub company_name: String,
    pub contact_email: String,
    pub phone_number: String,
    pub time_zone: String,
    pub address: String,
    pub distance_unit: String,
    pub currency: String,
    pub date_format: String,
    pub notify_maintenance_alerts: bool,
    pub notify_license_expiry: bool,
    pub notify_service_completion: bool,
    pub notify_payment: bool,
    pub notify_sms: bool,
    pub notify_desktop: bool,
    pub notify_weekly_summary: bool,
}

// ── Logistics ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDto {
    pub id: String,
    pub name: Option<String>,
    pub contact_info: Option<serde_json::Value>,
    pub billing_address: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCustomerDto {
    pub name: String,
    pub contact_info: serde_json::Value,
    pub billing_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransportJobDto {
    pub id: String,
    pub customer_id: String,
    pub status: Option<String>,
    /// Decimal serialized as a string on the wire.
    pub agreed_price: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTransportJobDto {
    pub customer_id: String,
    pub status: String,
    pub agreed_price: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    pub id: String,
    pub job_id: String,
    pub origin: Option<serde_json::Value>,
    pub destination: Option<serde_json::Value>,
    pub waypoints: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRouteDto {
    pub job_id: String,
    pub origin: serde_json::Value,
    pub destination: serde_json::Value,
    pub waypoints: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShipmentDto {
    pub id: String,
    pub job_id: String,
    pub weight: Option<f64>,
    pub dimensions: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateShipmentDto {
    pub job_id: String,
    pub weight: f64,
    pub dimensions: serde_json::Value,
    #[serde(rename = "type")]
    pub kind: String,
}
