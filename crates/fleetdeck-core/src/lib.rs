// fleetdeck-core: Domain layer between fleetdeck-api and consumers.
//
// View models, DTO conversion, per-entity adaptation services, the query
// cache, dashboard aggregation, validation/formatting utilities, and the
// `Fleet` facade.

pub mod convert;
pub mod dashboard;
pub mod error;
pub mod fleet;
pub mod format;
pub mod model;
pub mod services;
pub mod session;
pub mod store;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use dashboard::DashboardService;
pub use error::CoreError;
pub use fleet::Fleet;
pub use session::{IntegrationKeys, MemorySessionStore, SessionContext, SessionState, SessionStore};
pub use store::{QueryCache, QueryKey};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Alert, AlertNotice, AlertSeverity, AppSettings, Assignment, AssignmentStatus,
    DashboardMetrics, Driver, DriverAvailability, MaintenanceRecord, MaintenanceType,
    MonthlyFinancialSummary, PaymentStatus, ServiceStatus, TransportService, UiSeverity, User,
    UserPreferences, UtilizationPoint, Vehicle, VehicleProfitability, VehicleStatus,
};
