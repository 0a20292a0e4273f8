// ── View models ──
//
// Stable internal shapes independent of backend DTO churn. Status and
// severity fields are narrow enums; every enum carries an exhaustive
// `from_wire` mapping with a documented default for unknown input, so raw
// backend strings never propagate past the conversion layer.

pub mod alert;
pub mod assignment;
pub mod driver;
pub mod financial;
pub mod logistics;
pub mod maintenance;
pub mod metrics;
pub mod settings;
pub mod user;
pub mod vehicle;

// ── Re-exports ──────────────────────────────────────────────────────

pub use alert::{Alert, AlertNotice, AlertSeverity, UiSeverity};
pub use assignment::{Assignment, AssignmentStatus};
pub use driver::{Driver, DriverAvailability};
pub use financial::{MonthlyFinancialSummary, VehicleProfitability};
pub use logistics::{PaymentStatus, ServiceStatus, TransportService};
pub use maintenance::{MaintenanceRecord, MaintenanceType};
pub use metrics::{DashboardMetrics, UtilizationPoint};
pub use settings::{AppSettings, DateFormat, DistanceUnit, UserPreferences};
pub use user::User;
pub use vehicle::{Vehicle, VehicleStatus};
