// ── Domain adaptation services ──
//
// One service per entity, each a thin struct over `Arc<ApiClient>` that
// maps wire DTOs into view models. Shared contract: collection reads log
// and degrade to an empty `Vec` on failure; single-item reads and every
// write return `Result` and propagate `CoreError`. A failed list fetch
// should degrade to "no data" rather than break a page; a failed write
// must be visible to the caller.

pub mod assignments;
pub mod auth;
pub mod drivers;
pub mod financial;
pub mod logistics;
pub mod maintenance;
pub mod settings;
pub mod vehicles;

pub use assignments::{AssignmentService, NewAssignment};
pub use auth::{AuthService, LoginOutcome};
pub use drivers::{DriverService, DriverUpdate, NewDriver};
pub use financial::FinancialService;
pub use logistics::LogisticsService;
pub use maintenance::{MaintenanceService, NewAlert, NewMaintenanceRecord};
pub use settings::SettingsService;
pub use vehicles::{NewVehicle, VehicleService};
