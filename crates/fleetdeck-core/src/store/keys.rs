/// Structured cache keys. List, single-item, and filtered queries are
/// independently cacheable and invalidatable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Vehicles,
    Vehicle(String),
    VehicleMaintenance(String),
    Drivers,
    Driver(String),
    DriverAssignments(String),
    Assignments,
    AssignmentsByVehicle(String),
    Alerts,
    MaintenanceRecords(String),
    FinancialSummary,
    VehicleProfitability,
    Settings,
    Users,
    Services,
    DashboardMetrics,
    DashboardAssignments,
    DashboardAlerts,
    DashboardUtilization,
}

impl QueryKey {
    /// The list-level key this key hangs under, for prefix-style
    /// invalidation. List keys are their own root.
    pub fn root(&self) -> QueryKey {
        match self {
            Self::Vehicle(_) | Self::VehicleMaintenance(_) => Self::Vehicles,
            Self::Driver(_) | Self::DriverAssignments(_) => Self::Drivers,
            Self::AssignmentsByVehicle(_) => Self::Assignments,
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_scoped_keys_roll_up_to_their_list() {
        assert_eq!(QueryKey::Vehicle("v-1".into()).root(), QueryKey::Vehicles);
        assert_eq!(
            QueryKey::DriverAssignments("d-1".into()).root(),
            QueryKey::Drivers
        );
        assert_eq!(QueryKey::Drivers.root(), QueryKey::Drivers);
    }
}
