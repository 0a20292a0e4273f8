// ── Fleet facade ──
//
// Owns the API client, the per-entity services, the query cache, and the
// session context. Consumers go through the cached query entry points
// and the mutation helpers; the helpers invalidate exactly the cache
// keys a mutation could have staled: the list key always, the
// single-item key when the response carries an id.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use fleetdeck_api::ApiClient;
use secrecy::SecretString;

use crate::dashboard::DashboardService;
use crate::error::CoreError;
use crate::model::{
    Alert, AlertNotice, AppSettings, Assignment, AssignmentStatus, DashboardMetrics, DateFormat,
    DistanceUnit, Driver, MaintenanceRecord, MonthlyFinancialSummary, TransportService, User,
    UserPreferences, UtilizationPoint, Vehicle, VehicleProfitability, VehicleStatus,
};
use crate::services::{
    AssignmentService, AuthService, DriverService, DriverUpdate, FinancialService,
    LogisticsService, MaintenanceService, NewAlert, NewAssignment, NewDriver,
    NewMaintenanceRecord, NewVehicle, SettingsService, VehicleService,
};
use crate::session::SessionContext;
use crate::store::{QueryCache, QueryKey};

/// How often the alert poller refreshes, approximating real-time
/// freshness without a push channel.
pub const ALERT_POLL_INTERVAL: Duration = Duration::from_secs(30);

pub struct Fleet {
    api: Arc<ApiClient>,
    pub vehicles: VehicleService,
    pub drivers: DriverService,
    pub assignments: AssignmentService,
    pub maintenance: MaintenanceService,
    pub financial: FinancialService,
    pub settings: SettingsService,
    pub logistics: LogisticsService,
    pub auth: AuthService,
    pub dashboard: DashboardService,
    cache: Arc<QueryCache>,
    session: Arc<SessionContext>,
    // Replaced wholesale on logout; a cancelled token stays cancelled.
    shutdown: Mutex<CancellationToken>,
}

impl Fleet {
    /// Assemble the facade. A token already present in the session is
    /// installed on the client so the app resumes logged in.
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        let api = Arc::new(api);
        if let Some(token) = session.token() {
            api.set_token(SecretString::from(token));
        }

        Self {
            vehicles: VehicleService::new(Arc::clone(&api)),
            drivers: DriverService::new(Arc::clone(&api)),
            assignments: AssignmentService::new(Arc::clone(&api)),
            maintenance: MaintenanceService::new(Arc::clone(&api)),
            financial: FinancialService::new(Arc::clone(&api)),
            settings: SettingsService::new(Arc::clone(&api)),
            logistics: LogisticsService::new(Arc::clone(&api)),
            auth: AuthService::new(Arc::clone(&api)),
            dashboard: DashboardService::new(Arc::clone(&api)),
            api,
            cache: Arc::new(QueryCache::new()),
            session: Arc::new(session),
            shutdown: Mutex::new(CancellationToken::new()),
        }
    }

    fn shutdown_token(&self) -> std::sync::MutexGuard<'_, CancellationToken> {
        self.shutdown
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ── Auth lifecycle ───────────────────────────────────────────────

    /// Log in and persist the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, CoreError> {
        let outcome = self.auth.login(email, password).await?;
        self.session
            .set_session(outcome.token, outcome.user.clone())?;
        Ok(outcome.user)
    }

    /// Drop the token everywhere, stop background tasks, and empty the
    /// cache so the next user starts clean.
    ///
    /// The cancellation token is swapped for a fresh one: pollers spawned
    /// after a re-login on the same `Fleet` must not inherit a dead token.
    pub fn logout(&self) -> Result<(), CoreError> {
        self.auth.logout();
        let expired = {
            let mut token = self.shutdown_token();
            std::mem::replace(&mut *token, CancellationToken::new())
        };
        expired.cancel();
        self.cache.clear();
        self.session.clear_auth()
    }

    // ── Cached queries ───────────────────────────────────────────────

    pub async fn vehicles_cached(&self) -> Arc<Vec<Vehicle>> {
        self.infallible(QueryKey::Vehicles, self.vehicles.get_all())
            .await
    }

    pub async fn vehicle(&self, id: &str) -> Result<Arc<Vehicle>, CoreError> {
        self.cache
            .get_or_fetch(QueryKey::Vehicle(id.to_owned()), || {
                self.vehicles.get_by_id(id)
            })
            .await
    }

    pub async fn vehicle_maintenance(&self, id: &str) -> Arc<Vec<MaintenanceRecord>> {
        self.infallible(
            QueryKey::VehicleMaintenance(id.to_owned()),
            self.vehicles.maintenance_history(id),
        )
        .await
    }

    pub async fn drivers_cached(&self) -> Arc<Vec<Driver>> {
        self.infallible(QueryKey::Drivers, self.drivers.get_all())
            .await
    }

    pub async fn driver(&self, id: &str) -> Result<Arc<Driver>, CoreError> {
        self.cache
            .get_or_fetch(QueryKey::Driver(id.to_owned()), || {
                self.drivers.get_by_id(id)
            })
            .await
    }

    pub async fn driver_assignments(&self, id: &str) -> Arc<Vec<Assignment>> {
        self.infallible(
            QueryKey::DriverAssignments(id.to_owned()),
            self.drivers.assignment_history(id),
        )
        .await
    }

    pub async fn assignments_cached(&self) -> Arc<Vec<Assignment>> {
        self.infallible(QueryKey::Assignments, self.assignments.get_all())
            .await
    }

    pub async fn assignments_by_vehicle(&self, vehicle_id: &str) -> Arc<Vec<Assignment>> {
        self.infallible(
            QueryKey::AssignmentsByVehicle(vehicle_id.to_owned()),
            self.assignments.get_by_vehicle(vehicle_id),
        )
        .await
    }

    pub async fn alerts_cached(&self) -> Arc<Vec<Alert>> {
        self.infallible(QueryKey::Alerts, self.maintenance.get_alerts())
            .await
    }

    pub async fn maintenance_records(&self, vehicle_id: &str) -> Arc<Vec<MaintenanceRecord>> {
        self.infallible(
            QueryKey::MaintenanceRecords(vehicle_id.to_owned()),
            self.maintenance.records_for_vehicle(vehicle_id),
        )
        .await
    }

    pub async fn financial_summary_cached(&self) -> Arc<Vec<MonthlyFinancialSummary>> {
        self.infallible(
            QueryKey::FinancialSummary,
            self.financial.monthly_summary(None, None),
        )
        .await
    }

    pub async fn vehicle_profitability_cached(&self) -> Arc<Vec<VehicleProfitability>> {
        self.infallible(
            QueryKey::VehicleProfitability,
            self.financial.vehicle_profitability(None, None),
        )
        .await
    }

    /// Cached settings fetch. Every successful fetch syncs the session
    /// preferences from the backend record.
    pub async fn settings_cached(&self) -> Result<Arc<AppSettings>, CoreError> {
        let settings = self
            .cache
            .get_or_fetch(QueryKey::Settings, || self.settings.get())
            .await?;
        self.sync_preferences(&settings)?;
        Ok(settings)
    }

    pub async fn users_cached(&self) -> Result<Arc<Vec<User>>, CoreError> {
        self.cache
            .get_or_fetch(QueryKey::Users, || self.settings.list_users())
            .await
    }

    pub async fn services_cached(&self) -> Arc<Vec<TransportService>> {
        self.infallible(QueryKey::Services, self.logistics.get_all())
            .await
    }

    pub async fn dashboard_metrics(&self) -> Arc<DashboardMetrics> {
        self.infallible(QueryKey::DashboardMetrics, self.dashboard.get_metrics())
            .await
    }

    pub async fn dashboard_assignments(&self) -> Arc<Vec<Assignment>> {
        self.infallible(
            QueryKey::DashboardAssignments,
            self.dashboard.get_recent_assignments(),
        )
        .await
    }

    pub async fn dashboard_alerts(&self) -> Arc<Vec<AlertNotice>> {
        self.infallible(QueryKey::DashboardAlerts, self.dashboard.get_alerts())
            .await
    }

    pub async fn dashboard_utilization(&self) -> Arc<Vec<UtilizationPoint>> {
        self.infallible(
            QueryKey::DashboardUtilization,
            self.dashboard.get_utilization(),
        )
        .await
    }

    /// Cache a read-path value; read paths never fail, they degrade.
    async fn infallible<T, Fut>(&self, key: QueryKey, fetch: Fut) -> Arc<T>
    where
        T: Default + Send + Sync + 'static,
        Fut: Future<Output = T>,
    {
        match self
            .cache
            .get_or_fetch(key, || async { Ok::<_, CoreError>(fetch.await) })
            .await
        {
            Ok(value) => value,
            // Unreachable: the fetcher above cannot fail.
            Err(_) => Arc::new(T::default()),
        }
    }

    // ── Mutations with invalidation ──────────────────────────────────

    pub async fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle, CoreError> {
        let created = self.vehicles.create(vehicle).await?;
        self.cache.invalidate(&QueryKey::Vehicles);
        Ok(created)
    }

    pub async fn update_vehicle_status(
        &self,
        id: &str,
        status: Option<VehicleStatus>,
    ) -> Result<Vehicle, CoreError> {
        let updated = self.vehicles.update_status(id, status).await?;
        self.invalidate_list_and_item(QueryKey::Vehicles, QueryKey::Vehicle(updated.id.clone()));
        Ok(updated)
    }

    pub async fn delete_vehicle(&self, id: &str) -> Result<(), CoreError> {
        self.vehicles.delete(id).await?;
        self.invalidate_list_and_item(QueryKey::Vehicles, QueryKey::Vehicle(id.to_owned()));
        Ok(())
    }

    /// Creating a driver invalidates only the list; there is no item
    /// entry to stale yet.
    pub async fn create_driver(&self, driver: &NewDriver) -> Result<Driver, CoreError> {
        let created = self.drivers.create(driver).await?;
        self.cache.invalidate(&QueryKey::Drivers);
        Ok(created)
    }

    /// Updating a driver invalidates the list and that driver's item
    /// entry.
    pub async fn update_driver(
        &self,
        id: &str,
        driver: &DriverUpdate,
    ) -> Result<Driver, CoreError> {
        let updated = self.drivers.update(id, driver).await?;
        self.invalidate_list_and_item(QueryKey::Drivers, QueryKey::Driver(id.to_owned()));
        Ok(updated)
    }

    pub async fn delete_driver(&self, id: &str) -> Result<(), CoreError> {
        self.drivers.delete(id).await?;
        self.invalidate_list_and_item(QueryKey::Drivers, QueryKey::Driver(id.to_owned()));
        Ok(())
    }

    pub async fn create_assignment(
        &self,
        assignment: &NewAssignment,
    ) -> Result<Assignment, CoreError> {
        let created = self.assignments.create(assignment).await?;
        // Staling the root also stales every by-vehicle filtered entry.
        self.cache.invalidate_root(&QueryKey::Assignments);
        self.cache
            .invalidate(&QueryKey::DriverAssignments(created.driver_id.clone()));
        // Assigning a vehicle changes its status.
        self.cache.invalidate(&QueryKey::Vehicles);
        Ok(created)
    }

    pub async fn update_assignment_status(
        &self,
        id: &str,
        status: AssignmentStatus,
    ) -> Result<Assignment, CoreError> {
        let updated = self.assignments.update_status(id, status).await?;
        self.cache.invalidate_root(&QueryKey::Assignments);
        self.cache
            .invalidate(&QueryKey::DriverAssignments(updated.driver_id.clone()));
        Ok(updated)
    }

    pub async fn create_alert(&self, alert: &NewAlert) -> Result<Alert, CoreError> {
        let created = self.maintenance.create_alert(alert).await?;
        self.cache.invalidate(&QueryKey::Alerts);
        Ok(created)
    }

    pub async fn resolve_alert(&self, id: &str) -> Result<(), CoreError> {
        self.maintenance.resolve_alert(id).await?;
        self.cache.invalidate(&QueryKey::Alerts);
        Ok(())
    }

    pub async fn create_maintenance_record(
        &self,
        record: &NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, CoreError> {
        let created = self.maintenance.create_record(record).await?;
        self.cache
            .invalidate(&QueryKey::MaintenanceRecords(record.vehicle_id.clone()));
        self.cache
            .invalidate(&QueryKey::VehicleMaintenance(record.vehicle_id.clone()));
        Ok(created)
    }

    pub async fn update_settings(&self, settings: &AppSettings) -> Result<AppSettings, CoreError> {
        let updated = self.settings.update(settings).await?;
        self.cache.invalidate(&QueryKey::Settings);
        self.sync_preferences(&updated)?;
        Ok(updated)
    }

    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        role: &str,
        is_active: bool,
    ) -> Result<User, CoreError> {
        let created = self
            .settings
            .create_user(email, password, role, is_active)
            .await?;
        self.cache.invalidate(&QueryKey::Users);
        Ok(created)
    }

    pub async fn update_user(
        &self,
        id: &str,
        role: &str,
        is_active: bool,
    ) -> Result<User, CoreError> {
        let updated = self.settings.update_user(id, role, is_active).await?;
        self.cache.invalidate(&QueryKey::Users);
        Ok(updated)
    }

    fn invalidate_list_and_item(&self, list: QueryKey, item: QueryKey) {
        self.cache.invalidate(&list);
        self.cache.invalidate(&item);
    }

    /// Mirror backend settings into the durable display preferences.
    fn sync_preferences(&self, settings: &AppSettings) -> Result<(), CoreError> {
        let preferences = UserPreferences {
            distance_unit: settings
                .distance_unit
                .parse::<DistanceUnit>()
                .unwrap_or(DistanceUnit::Miles),
            currency: settings.currency.clone(),
            date_format: settings
                .date_format
                .parse::<DateFormat>()
                .unwrap_or(DateFormat::MonthFirst),
        };
        self.session.set_preferences(preferences)
    }

    // ── Background polling ───────────────────────────────────────────

    /// Spawn the alert poller: refreshes the alerts cache entry every
    /// 30 s until `logout` or an explicit cancel. A failed poll logs and
    /// keeps the previous snapshot.
    pub fn spawn_alert_poller(&self) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let cache = Arc::clone(&self.cache);
        let token = self.shutdown_token().child_token();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ALERT_POLL_INTERVAL);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    () = token.cancelled() => {
                        info!("alert poller stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        match api.list_alerts().await {
                            Ok(dtos) => {
                                let alerts: Vec<Alert> =
                                    dtos.into_iter().map(Alert::from).collect();
                                debug!("alert poll refreshed {} alerts", alerts.len());
                                cache.put(QueryKey::Alerts, alerts);
                            }
                            Err(err) => {
                                warn!("alert poll failed, keeping previous snapshot: {err}");
                            }
                        }
                    }
                }
            }
        })
    }

    /// Cancel all background tasks.
    pub fn shutdown(&self) {
        self.shutdown_token().cancel();
    }
}
