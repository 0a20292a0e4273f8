use std::sync::Arc;

use tracing::warn;

use fleetdeck_api::ApiClient;
use fleetdeck_api::types::{CreateDriverDto, UpdateDriverDto};

use crate::error::CoreError;
use crate::model::{Assignment, Driver, DriverAvailability};

/// A driver as submitted from a form. `user_id` links the driver to an
/// existing user account.
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub user_id: String,
    pub availability: DriverAvailability,
    pub license: String,
    pub license_expiry: String,
    pub hours_this_week: u32,
    pub wage_rate: f64,
    pub phone: String,
    pub email: String,
}

/// Fields a driver update can change.
#[derive(Debug, Clone)]
pub struct DriverUpdate {
    pub availability: DriverAvailability,
    pub license: Option<String>,
    pub license_expiry: Option<String>,
    pub hours_this_week: u32,
    pub wage_rate: f64,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Adapts the drivers endpoints to view models.
#[derive(Clone)]
pub struct DriverService {
    api: Arc<ApiClient>,
}

impl DriverService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// All drivers; degrades to empty on failure.
    pub async fn get_all(&self) -> Vec<Driver> {
        match self.api.list_drivers().await {
            Ok(dtos) => dtos.into_iter().map(Driver::from).collect(),
            Err(err) => {
                warn!("failed to fetch drivers: {err}");
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Driver, CoreError> {
        let dto = self.api.get_driver(id).await?;
        Ok(Driver::from(dto))
    }

    /// Create a driver. The backend only persists the link, status, and
    /// license number; the rest of the view model echoes the form input.
    pub async fn create(&self, driver: &NewDriver) -> Result<Driver, CoreError> {
        let status = if driver.availability == DriverAvailability::Available {
            "Available"
        } else {
            "OffDuty"
        };
        let dto = CreateDriverDto {
            user_id: driver.user_id.clone(),
            status: status.to_owned(),
            license_number: driver.license.clone(),
        };

        let d = self.api.create_driver(&dto).await?;
        Ok(Driver {
            id: d.id.unwrap_or_default(),
            name: d.name.unwrap_or_default(),
            license: d.license_number.unwrap_or_default(),
            license_expiry: driver.license_expiry.clone(),
            availability: DriverAvailability::from_write_status(d.status.as_deref().unwrap_or("")),
            hours_this_week: driver.hours_this_week,
            wage_rate: driver.wage_rate,
            phone: driver.phone.clone(),
            email: driver.email.clone(),
        })
    }

    /// Update a driver's availability and license. Same echo pattern as
    /// create, with fixed fallbacks where the form left fields blank.
    pub async fn update(&self, id: &str, driver: &DriverUpdate) -> Result<Driver, CoreError> {
        let status = if driver.availability == DriverAvailability::Available {
            "Available"
        } else {
            "OffDuty"
        };
        let dto = UpdateDriverDto {
            status: status.to_owned(),
            license_number: driver.license.clone(),
        };

        let d = self.api.update_driver(id, &dto).await?;
        Ok(Driver {
            id: d.id.unwrap_or_default(),
            name: d.name.unwrap_or_default(),
            license: d.license_number.unwrap_or_default(),
            license_expiry: driver
                .license_expiry
                .clone()
                .unwrap_or_else(|| "2025-01-01".to_owned()),
            availability: DriverAvailability::from_write_status(d.status.as_deref().unwrap_or("")),
            hours_this_week: driver.hours_this_week,
            wage_rate: driver.wage_rate,
            phone: driver
                .phone
                .clone()
                .unwrap_or_else(|| "555-0123".to_owned()),
            email: driver
                .email
                .clone()
                .unwrap_or_else(|| "driver@example.com".to_owned()),
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.api.delete_driver(id).await?;
        Ok(())
    }

    /// Assignment history for one driver; degrades to empty on failure.
    pub async fn assignment_history(&self, id: &str) -> Vec<Assignment> {
        match self.api.list_assignments_for_driver(id).await {
            Ok(dtos) => dtos.into_iter().map(Assignment::from).collect(),
            Err(err) => {
                warn!("failed to fetch assignment history for {id}: {err}");
                Vec::new()
            }
        }
    }
}
