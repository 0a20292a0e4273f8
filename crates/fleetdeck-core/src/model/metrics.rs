/// Dashboard summary counters. Pure aggregates, recomputed on every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardMetrics {
    pub total_vehicles: u32,
    pub available_vehicles: u32,
    pub total_drivers: u32,
    pub on_duty_drivers: u32,
    pub active_assignments: u32,
    pub completed_assignments: u32,
    pub open_alerts: u32,
    pub severe_alerts: u32,
}

impl DashboardMetrics {
    /// The fail-soft aggregate: all counters zero.
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// One point on the fleet-utilization chart.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilizationPoint {
    pub label: String,
    pub value: f64,
}
