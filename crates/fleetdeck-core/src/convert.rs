// ── API-to-domain type conversions ──
//
// Bridges raw `fleetdeck_api` DTOs into `fleetdeck_core::model` view
// models. Each conversion normalizes field names, narrows status strings
// into enums, and fills fixed placeholders for fields the backend does
// not supply yet. The placeholder values are deliberate: they mark
// backend-completeness gaps and must stay exactly as they are until the
// backend grows the real fields.

use chrono::{DateTime, Utc};

use fleetdeck_api::types::{
    AlertDto, AppSettingsDto, AssignmentDto, DriverDto, MaintenanceRecordDto, MonthlySummaryDto,
    UpdateAppSettingsDto, UserDto, VehicleDto, VehicleProfitabilityDto,
};

use crate::model::{
    Alert, AlertSeverity, AppSettings, Assignment, AssignmentStatus, Driver, DriverAvailability,
    MaintenanceRecord, MaintenanceType, MonthlyFinancialSummary, User, Vehicle,
    VehicleProfitability, VehicleStatus,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// Parse a wire decimal string (`"1234.50"`), falling back to 0.0.
pub(crate) fn parse_money(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0.0)
}

/// Render a GeoJSON-ish point as `"lat, lng"` with 5 decimals, or `"—"`
/// when the value is missing or malformed. GeoJSON coordinate order is
/// `[lng, lat]`.
pub(crate) fn format_geo_point(geo: Option<&serde_json::Value>) -> String {
    let coords = geo
        .and_then(|v| v.get("coordinates"))
        .and_then(|c| c.as_array());
    if let Some(coords) = coords {
        if let (Some(lng), Some(lat)) = (
            coords.first().and_then(serde_json::Value::as_f64),
            coords.get(1).and_then(serde_json::Value::as_f64),
        ) {
            return format!("{lat:.5}, {lng:.5}");
        }
    }
    "—".to_owned()
}

/// Truncate an RFC 3339 timestamp to its `YYYY-MM-DD` date, or `"—"`.
pub(crate) fn date_part(raw: Option<&str>) -> String {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "—".to_owned())
}

// ── Vehicle ─────────────────────────────────────────────────────────

impl From<VehicleDto> for Vehicle {
    fn from(v: VehicleDto) -> Self {
        Self {
            id: v.id.unwrap_or_default(),
            model: format!(
                "{} {}",
                v.make.unwrap_or_default(),
                v.model.unwrap_or_default()
            ),
            // Category is not modeled backend-side yet.
            category: "Truck".to_owned(),
            status: VehicleStatus::from_wire(v.status.as_deref().unwrap_or("")),
            mileage: v.current_mileage.unwrap_or(0),
            last_service: v
                .last_service_date
                .unwrap_or_else(|| "2024-01-01".to_owned()),
            // Placeholder until the backend tracks utilization.
            utilization: 0,
        }
    }
}

// ── Driver ──────────────────────────────────────────────────────────

impl From<DriverDto> for Driver {
    fn from(d: DriverDto) -> Self {
        let email = d.email;
        Self {
            id: d.id.unwrap_or_default(),
            name: d
                .name
                .or_else(|| email.clone())
                .unwrap_or_else(|| "Unknown".to_owned()),
            license: d.license_number.unwrap_or_else(|| "N/A".to_owned()),
            license_expiry: d
                .license_expiry
                .unwrap_or_else(|| "2025-01-01".to_owned()),
            availability: DriverAvailability::from_wire(d.status.as_deref().unwrap_or("")),
            // Placeholder until hours are tracked.
            hours_this_week: 0,
            wage_rate: d
                .wage_rate
                .and_then(|w| w.parse().ok())
                .unwrap_or(25.0),
            phone: d.phone.unwrap_or_else(|| "N/A".to_owned()),
            email: email.unwrap_or_else(|| "unknown@example.com".to_owned()),
        }
    }
}

// ── Assignment ──────────────────────────────────────────────────────

impl From<AssignmentDto> for Assignment {
    fn from(a: AssignmentDto) -> Self {
        Self {
            id: a.id.unwrap_or_default(),
            vehicle_id: a.vehicle_id.unwrap_or_default(),
            driver_id: a.driver_id.unwrap_or_default(),
            vehicle_name: None,
            driver_name: None,
            status: AssignmentStatus::from_wire(a.status.as_deref().unwrap_or("")),
            start_date: a.start_time.unwrap_or_default(),
            end_date: a.end_time,
            // Placeholder until assignments carry a location.
            location: "Unknown".to_owned(),
            // List views have no progress source; the dashboard infers
            // its own from status.
            progress: 0,
        }
    }
}

// ── Maintenance ─────────────────────────────────────────────────────

impl From<MaintenanceRecordDto> for MaintenanceRecord {
    fn from(r: MaintenanceRecordDto) -> Self {
        Self {
            id: r.id.unwrap_or_default(),
            vehicle_id: r.vehicle_id.unwrap_or_default(),
            kind: MaintenanceType::from_wire(r.kind.as_deref().unwrap_or("")),
            cost: parse_money(r.cost.as_deref()),
            date: r.date.unwrap_or_default(),
            provider: r.provider.unwrap_or_else(|| "N/A".to_owned()),
            description: r.description,
        }
    }
}

// ── Alert ───────────────────────────────────────────────────────────

impl From<AlertDto> for Alert {
    fn from(a: AlertDto) -> Self {
        Self {
            id: a.id.unwrap_or_default(),
            entity_id: a.entity_id.unwrap_or_default(),
            kind: a.kind.unwrap_or_default(),
            message: a.message.unwrap_or_default(),
            severity: AlertSeverity::from_wire(a.severity.as_deref().unwrap_or("")),
            is_resolved: a.is_resolved.unwrap_or(false),
            created_at: a.created_at.unwrap_or_default(),
            resolved_at: a.resolved_at,
        }
    }
}

// ── Financial ───────────────────────────────────────────────────────

impl From<MonthlySummaryDto> for MonthlyFinancialSummary {
    fn from(m: MonthlySummaryDto) -> Self {
        Self {
            month: m.month.unwrap_or_default(),
            revenue: parse_money(m.revenue.as_deref()),
            cost: parse_money(m.cost.as_deref()),
            profit: parse_money(m.profit.as_deref()),
        }
    }
}

impl From<VehicleProfitabilityDto> for VehicleProfitability {
    fn from(p: VehicleProfitabilityDto) -> Self {
        Self {
            vehicle_id: p.vehicle_id.unwrap_or_default(),
            vehicle_plate: p.vehicle_plate.unwrap_or_default(),
            revenue: parse_money(p.revenue.as_deref()),
            cost: parse_money(p.cost.as_deref()),
            profit: parse_money(p.profit.as_deref()),
            rank: p.rank.unwrap_or(0),
        }
    }
}

// ── Settings ────────────────────────────────────────────────────────

impl From<AppSettingsDto> for AppSettings {
    fn from(s: AppSettingsDto) -> Self {
        Self {
            company_name: s.company_name,
            contact_email: s.contact_email,
            phone_number: s.phone_number,
            time_zone: s.time_zone,
            address: s.address,
            distance_unit: s.distance_unit,
            currency: s.currency,
            date_format: s.date_format,
            notify_maintenance_alerts: s.notify_maintenance_alerts,
            notify_license_expiry: s.notify_license_expiry,
            notify_service_completion: s.notify_service_completion,
            notify_payment: s.notify_payment,
            notify_sms: s.notify_sms,
            notify_desktop: s.notify_desktop,
            notify_weekly_summary: s.notify_weekly_summary,
        }
    }
}

impl From<&AppSettings> for UpdateAppSettingsDto {
    fn from(s: &AppSettings) -> Self {
        Self {
            company_name: s.company_name.clone(),
            contact_email: s.contact_email.clone(),
            phone_number: s.phone_number.clone(),
            time_zone: s.time_zone.clone(),
            address: s.address.clone(),
            distance_unit: s.distance_unit.clone(),
            currency: s.currency.clone(),
            date_format: s.date_format.clone(),
            notify_maintenance_alerts: s.notify_maintenance_alerts,
            notify_license_expiry: s.notify_license_expiry,
            notify_service_completion: s.notify_service_completion,
            notify_payment: s.notify_payment,
            notify_sms: s.notify_sms,
            notify_desktop: s.notify_desktop,
            notify_weekly_summary: s.notify_weekly_summary,
        }
    }
}

// ── User ────────────────────────────────────────────────────────────

impl From<UserDto> for User {
    fn from(u: UserDto) -> Self {
        Self {
            id: u.id,
            email: u.email,
            role: u.role,
            name: u.name,
            is_active: u.is_active.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_vehicle() -> VehicleDto {
        VehicleDto {
            id: None,
            make: None,
            model: None,
            year: None,
            vin: None,
            license_plate: None,
            kind: None,
            status: None,
            current_mileage: None,
            last_service_date: None,
            fuel_type: None,
            specs: None,
        }
    }

    fn empty_driver() -> DriverDto {
        DriverDto {
            id: None,
            user_id: None,
            name: None,
            email: None,
            phone: None,
            license_number: None,
            license_expiry: None,
            status: None,
            wage_rate: None,
        }
    }

    #[test]
    fn vehicle_display_model_composes_make_and_model() {
        let v = Vehicle::from(VehicleDto {
            make: Some("Volvo".into()),
            model: Some("FH16".into()),
            status: Some("InUse".into()),
            ..empty_vehicle()
        });
        assert_eq!(v.model, "Volvo FH16");
        assert_eq!(v.status, VehicleStatus::Assigned);
        assert_eq!(v.category, "Truck");
    }

    #[test]
    fn vehicle_unknown_status_defaults_to_available() {
        let v = Vehicle::from(VehicleDto {
            status: Some("Exploded".into()),
            ..empty_vehicle()
        });
        assert_eq!(v.status, VehicleStatus::Available);
    }

    #[test]
    fn vehicle_placeholder_fills() {
        let v = Vehicle::from(empty_vehicle());
        assert_eq!(v.last_service, "2024-01-01");
        assert_eq!(v.mileage, 0);
        assert_eq!(v.utilization, 0);
    }

    #[test]
    fn driver_name_falls_back_to_email_then_unknown() {
        let named = Driver::from(DriverDto {
            name: Some("Ana Ruiz".into()),
            email: Some("ana@example.com".into()),
            ..empty_driver()
        });
        assert_eq!(named.name, "Ana Ruiz");

        let email_only = Driver::from(DriverDto {
            email: Some("ana@example.com".into()),
            ..empty_driver()
        });
        assert_eq!(email_only.name, "ana@example.com");

        let anonymous = Driver::from(empty_driver());
        assert_eq!(anonymous.name, "Unknown");
        assert_eq!(anonymous.email, "unknown@example.com");
    }

    #[test]
    fn driver_placeholder_fills() {
        let d = Driver::from(empty_driver());
        assert_eq!(d.license, "N/A");
        assert_eq!(d.license_expiry, "2025-01-01");
        assert_eq!(d.phone, "N/A");
        assert!((d.wage_rate - 25.0).abs() < f64::EPSILON);
        assert_eq!(d.hours_this_week, 0);
        assert_eq!(d.availability, DriverAvailability::OffDuty);
    }

    #[test]
    fn driver_wage_rate_parses_wire_string() {
        let d = Driver::from(DriverDto {
            wage_rate: Some("31.50".into()),
            ..empty_driver()
        });
        assert!((d.wage_rate - 31.5).abs() < f64::EPSILON);
    }

    #[test]
    fn driver_write_status_mapping_is_lossy() {
        assert_eq!(
            DriverAvailability::from_write_status("Active"),
            DriverAvailability::Available
        );
        assert_eq!(
            DriverAvailability::from_write_status("OnDuty"),
            DriverAvailability::OffDuty
        );
    }

    #[test]
    fn assignment_unknown_status_defaults_to_scheduled() {
        let a = Assignment::from(AssignmentDto {
            id: Some("as-1".into()),
            vehicle_id: Some("v-1".into()),
            driver_id: Some("d-1".into()),
            status: Some("Paused".into()),
            start_time: None,
            end_time: None,
        });
        assert_eq!(a.status, AssignmentStatus::Scheduled);
        assert_eq!(a.location, "Unknown");
        assert_eq!(a.progress, 0);
    }

    #[test]
    fn maintenance_cost_falls_back_to_zero() {
        let r = MaintenanceRecord::from(MaintenanceRecordDto {
            id: Some("m-1".into()),
            vehicle_id: Some("v-1".into()),
            kind: Some("Oil change".into()),
            cost: Some("not a number".into()),
            date: None,
            provider: None,
            description: None,
        });
        assert!((r.cost - 0.0).abs() < f64::EPSILON);
        assert_eq!(r.kind, MaintenanceType::Preventive);
        assert_eq!(r.provider, "N/A");
    }

    #[test]
    fn alert_severity_mappings() {
        assert_eq!(AlertSeverity::from_wire("Critical"), AlertSeverity::Critical);
        assert_eq!(AlertSeverity::from_wire("garbage"), AlertSeverity::Low);
        assert_eq!(
            AlertSeverity::Critical.ui_severity().to_string(),
            "high"
        );
        assert_eq!(AlertSeverity::Medium.ui_severity().to_string(), "medium");
        assert_eq!(AlertSeverity::Low.ui_severity().to_string(), "low");
    }

    #[test]
    fn monthly_summary_coerces_wire_strings() {
        let m = MonthlyFinancialSummary::from(MonthlySummaryDto {
            month: Some("2025-06".into()),
            revenue: Some("10000.00".into()),
            cost: Some("6000.00".into()),
            profit: None,
        });
        assert!((m.revenue - 10_000.0).abs() < f64::EPSILON);
        assert!((m.profit - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn geo_point_rendering() {
        let point = json!({ "type": "Point", "coordinates": [-73.98571, 40.74844] });
        assert_eq!(format_geo_point(Some(&point)), "40.74844, -73.98571");
        assert_eq!(format_geo_point(None), "—");
        assert_eq!(format_geo_point(Some(&json!({ "coordinates": "x" }))), "—");
    }

    #[test]
    fn date_part_truncates_rfc3339() {
        assert_eq!(date_part(Some("2025-06-15T10:30:00Z")), "2025-06-15");
        assert_eq!(date_part(Some("not a date")), "—");
        assert_eq!(date_part(None), "—");
    }
}
