// ── Dashboard aggregation ──
//
// Composes independent list fetches into summary counters and short
// lists. All reads are fail-soft: a zeroed metrics object or an empty
// list, never an error. Counter predicates run on raw wire statuses so
// the dashboard counts exactly what the backend reports.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use fleetdeck_api::ApiClient;

use crate::convert::parse_money;
use crate::model::{
    AlertNotice, AlertSeverity, Assignment, AssignmentStatus, DashboardMetrics, UtilizationPoint,
};

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<ApiClient>,
}

impl DashboardService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// The eight summary counters, computed from four concurrent list
    /// fetches. Any failure degrades the whole aggregate to zeroes
    /// rather than breaking the page.
    pub async fn get_metrics(&self) -> DashboardMetrics {
        let fetched = tokio::try_join!(
            self.api.list_vehicles(),
            self.api.list_drivers(),
            self.api.list_assignments(),
            self.api.list_alerts(),
        );

        let (vehicles, drivers, assignments, alerts) = match fetched {
            Ok(lists) => lists,
            Err(err) => {
                warn!("failed to fetch dashboard metrics: {err}");
                return DashboardMetrics::zeroed();
            }
        };

        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        let is_severe = |sev: Option<&str>| {
            sev.is_some_and(|s| AlertSeverity::from_wire(s).is_severe())
        };

        DashboardMetrics {
            total_vehicles: count(vehicles.len()),
            available_vehicles: count(
                vehicles
                    .iter()
                    .filter(|v| v.status.as_deref() == Some("Available"))
                    .count(),
            ),
            total_drivers: count(drivers.len()),
            on_duty_drivers: count(
                drivers
                    .iter()
                    .filter(|d| d.status.as_deref() == Some("OnDuty"))
                    .count(),
            ),
            active_assignments: count(
                assignments
                    .iter()
                    .filter(|a| a.status.as_deref() == Some("Active"))
                    .count(),
            ),
            completed_assignments: count(
                assignments
                    .iter()
                    .filter(|a| a.status.as_deref() == Some("Completed"))
                    .count(),
            ),
            open_alerts: count(
                alerts
                    .iter()
                    .filter(|a| !is_severe(a.severity.as_deref()))
                    .count(),
            ),
            severe_alerts: count(
                alerts
                    .iter()
                    .filter(|a| is_severe(a.severity.as_deref()))
                    .count(),
            ),
        }
    }

    /// The five most recent assignments with joined display names.
    /// Vehicle names prefer plate, then model, then the raw id; driver
    /// names prefer name, then user id, then the raw id.
    pub async fn get_recent_assignments(&self) -> Vec<Assignment> {
        let fetched = tokio::try_join!(
            self.api.list_assignments(),
            self.api.list_vehicles(),
            self.api.list_drivers(),
        );

        let (assignments, vehicles, drivers) = match fetched {
            Ok(lists) => lists,
            Err(err) => {
                warn!("failed to fetch recent assignments: {err}");
                return Vec::new();
            }
        };

        let vehicle_names: HashMap<String, String> = vehicles
            .into_iter()
            .filter_map(|v| {
                let id = v.id?;
                let name = v
                    .license_plate
                    .or(v.model)
                    .unwrap_or_else(|| id.clone());
                Some((id, name))
            })
            .collect();

        let driver_names: HashMap<String, String> = drivers
            .into_iter()
            .filter_map(|d| {
                let id = d.id?;
                let name = d.name.or(d.user_id).unwrap_or_else(|| id.clone());
                Some((id, name))
            })
            .collect();

        assignments
            .into_iter()
            .take(5)
            .map(|a| {
                let vehicle_id = a.vehicle_id.clone().unwrap_or_default();
                let driver_id = a.driver_id.clone().unwrap_or_default();
                let status = AssignmentStatus::from_wire(a.status.as_deref().unwrap_or(""));
                Assignment {
                    id: a.id.unwrap_or_default(),
                    vehicle_name: Some(
                        vehicle_names
                            .get(&vehicle_id)
                            .cloned()
                            .unwrap_or_else(|| vehicle_id.clone()),
                    ),
                    driver_name: Some(
                        driver_names
                            .get(&driver_id)
                            .cloned()
                            .unwrap_or_else(|| driver_id.clone()),
                    ),
                    vehicle_id,
                    driver_id,
                    status,
                    start_date: a.start_time.unwrap_or_default(),
                    end_date: a.end_time,
                    location: "—".to_owned(),
                    progress: status.inferred_progress(),
                }
            })
            .collect()
    }

    /// Open alerts in the dashboard vocabulary. Messages are synthesized
    /// from type and entity id until the backend supplies display text.
    pub async fn get_alerts(&self) -> Vec<AlertNotice> {
        let alerts = match self.api.list_alerts().await {
            Ok(alerts) => alerts,
            Err(err) => {
                warn!("failed to fetch dashboard alerts: {err}");
                return Vec::new();
            }
        };

        alerts
            .into_iter()
            .map(|a| AlertNotice {
                id: a.id.unwrap_or_default(),
                message: format!(
                    "{} for {}",
                    a.kind.as_deref().unwrap_or("Alert"),
                    a.entity_id.as_deref().unwrap_or("unknown entity"),
                ),
                severity: AlertSeverity::from_wire(a.severity.as_deref().unwrap_or(""))
                    .ui_severity(),
            })
            .collect()
    }

    /// Fleet utilization chart points. Monthly profit stands in for
    /// utilization until a real source exists.
    pub async fn get_utilization(&self) -> Vec<UtilizationPoint> {
        let summary = match self.api.financial_summary(None, None).await {
            Ok(summary) => summary,
            Err(err) => {
                warn!("failed to fetch utilization: {err}");
                return Vec::new();
            }
        };

        summary
            .into_iter()
            .map(|s| UtilizationPoint {
                label: s.month.unwrap_or_default(),
                value: parse_money(s.profit.as_deref()),
            })
            .collect()
    }
}
