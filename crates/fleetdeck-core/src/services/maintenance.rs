use std::sync::Arc;

use tracing::warn;

use fleetdeck_api::ApiClient;
use fleetdeck_api::types::{CreateAlertDto, CreateMaintenanceRecordDto};

use crate::error::CoreError;
use crate::model::{Alert, AlertSeverity, MaintenanceRecord, MaintenanceType};

/// An alert as raised from the maintenance page.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub entity_id: String,
    pub kind: String,
    pub severity: AlertSeverity,
}

/// A maintenance record as submitted from a form.
#[derive(Debug, Clone)]
pub struct NewMaintenanceRecord {
    pub vehicle_id: String,
    pub kind: MaintenanceType,
    pub cost: f64,
    pub date: String,
    pub provider: String,
    pub description: Option<String>,
}

/// Adapts the maintenance endpoints (alerts and records) to view models.
#[derive(Clone)]
pub struct MaintenanceService {
    api: Arc<ApiClient>,
}

impl MaintenanceService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// All open and resolved alerts; degrades to empty on failure.
    pub async fn get_alerts(&self) -> Vec<Alert> {
        match self.api.list_alerts().await {
            Ok(dtos) => dtos.into_iter().map(Alert::from).collect(),
            Err(err) => {
                warn!("failed to fetch alerts: {err}");
                Vec::new()
            }
        }
    }

    pub async fn create_alert(&self, alert: &NewAlert) -> Result<Alert, CoreError> {
        let dto = CreateAlertDto {
            entity_id: alert.entity_id.clone(),
            kind: alert.kind.clone(),
            severity: alert.severity.to_wire().to_owned(),
        };
        let created = self.api.create_alert(&dto).await?;
        Ok(Alert::from(created))
    }

    pub async fn resolve_alert(&self, id: &str) -> Result<(), CoreError> {
        self.api.resolve_alert(id).await?;
        Ok(())
    }

    /// Records for one vehicle; degrades to empty on failure.
    pub async fn records_for_vehicle(&self, vehicle_id: &str) -> Vec<MaintenanceRecord> {
        match self.api.list_maintenance_records(vehicle_id).await {
            Ok(dtos) => dtos.into_iter().map(MaintenanceRecord::from).collect(),
            Err(err) => {
                warn!("failed to fetch maintenance records for {vehicle_id}: {err}");
                Vec::new()
            }
        }
    }

    /// Create a record. Cost is a decimal string on the wire.
    pub async fn create_record(
        &self,
        record: &NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, CoreError> {
        let dto = CreateMaintenanceRecordDto {
            vehicle_id: record.vehicle_id.clone(),
            kind: record.kind.to_wire().to_owned(),
            cost: record.cost.to_string(),
            date: record.date.clone(),
            provider: record.provider.clone(),
            description: record.description.clone(),
        };
        let created = self.api.create_maintenance_record(&dto).await?;
        Ok(MaintenanceRecord::from(created))
    }
}
