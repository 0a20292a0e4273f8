use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use fleetdeck_api::ApiClient;
use fleetdeck_api::types::{CreateVehicleDto, UpdateVehicleDto};

use crate::error::CoreError;
use crate::model::{MaintenanceRecord, Vehicle, VehicleStatus};

/// A vehicle as submitted from a form, before the backend assigns an id.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    /// Display model string, `"{make} {model}"`; split back apart on create.
    pub model: String,
    pub mileage: i64,
}

/// Adapts the vehicles endpoints to view models.
#[derive(Clone)]
pub struct VehicleService {
    api: Arc<ApiClient>,
}

impl VehicleService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// All vehicles; degrades to empty on failure.
    pub async fn get_all(&self) -> Vec<Vehicle> {
        match self.api.list_vehicles().await {
            Ok(dtos) => dtos.into_iter().map(Vehicle::from).collect(),
            Err(err) => {
                warn!("failed to fetch vehicles: {err}");
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Vehicle, CoreError> {
        let dto = self.api.get_vehicle(id).await?;
        Ok(Vehicle::from(dto))
    }

    /// Create a vehicle. The form only captures a display model and
    /// mileage; the remaining required wire fields are synthesized until
    /// the form grows them.
    pub async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, CoreError> {
        let mut parts = vehicle.model.split(' ');
        let make = parts.next().filter(|s| !s.is_empty()).unwrap_or("Unknown");
        let rest = parts.collect::<Vec<_>>().join(" ");
        let now_ms = Utc::now().timestamp_millis();

        let dto = CreateVehicleDto {
            make: make.to_owned(),
            model: if rest.is_empty() {
                "Unknown".to_owned()
            } else {
                rest
            },
            year: 2024,
            vin: format!("VIN{now_ms}"),
            license_plate: format!("PLATE{now_ms}"),
            kind: "Truck".to_owned(),
            current_mileage: vehicle.mileage,
            fuel_type: "Diesel".to_owned(),
            specs: None,
        };

        let created = self.api.create_vehicle(&dto).await?;
        Ok(Vehicle::from(created))
    }

    /// Update a vehicle's status. Status is the only mutable field the
    /// backend accepts today.
    pub async fn update_status(
        &self,
        id: &str,
        status: Option<VehicleStatus>,
    ) -> Result<Vehicle, CoreError> {
        let dto = UpdateVehicleDto {
            status: status.map(|s| s.to_wire().to_owned()),
        };
        let updated = self.api.update_vehicle(id, &dto).await?;
        Ok(Vehicle::from(updated))
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.api.delete_vehicle(id).await?;
        Ok(())
    }

    /// Maintenance history for one vehicle; degrades to empty on failure.
    pub async fn maintenance_history(&self, id: &str) -> Vec<MaintenanceRecord> {
        match self.api.list_maintenance_records(id).await {
            Ok(dtos) => dtos.into_iter().map(MaintenanceRecord::from).collect(),
            Err(err) => {
                warn!("failed to fetch maintenance history for {id}: {err}");
                Vec::new()
            }
        }
    }
}
