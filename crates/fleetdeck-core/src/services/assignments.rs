use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use fleetdeck_api::ApiClient;
use fleetdeck_api::types::{CreateAssignmentDto, UpdateAssignmentDto};

use crate::error::CoreError;
use crate::model::{Assignment, AssignmentStatus};

/// An assignment as submitted from the scheduling form.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub vehicle_id: String,
    pub driver_id: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

/// Adapts the assignments endpoints to view models.
#[derive(Clone)]
pub struct AssignmentService {
    api: Arc<ApiClient>,
}

impl AssignmentService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// All assignments; degrades to empty on failure.
    pub async fn get_all(&self) -> Vec<Assignment> {
        match self.api.list_assignments().await {
            Ok(dtos) => dtos.into_iter().map(Assignment::from).collect(),
            Err(err) => {
                warn!("failed to fetch assignments: {err}");
                Vec::new()
            }
        }
    }

    /// Assignments for one vehicle. There is no dedicated endpoint;
    /// filters the full list client-side.
    pub async fn get_by_vehicle(&self, vehicle_id: &str) -> Vec<Assignment> {
        self.get_all()
            .await
            .into_iter()
            .filter(|a| a.vehicle_id == vehicle_id)
            .collect()
    }

    /// Create an assignment. Timestamps are normalized to RFC 3339 UTC
    /// before hitting the wire; new assignments always start `Scheduled`.
    pub async fn create(&self, assignment: &NewAssignment) -> Result<Assignment, CoreError> {
        let start_time = normalize_timestamp(&assignment.start_date)?;
        let end_time = assignment
            .end_date
            .as_deref()
            .map(normalize_timestamp)
            .transpose()?;

        let dto = CreateAssignmentDto {
            vehicle_id: assignment.vehicle_id.clone(),
            driver_id: assignment.driver_id.clone(),
            start_time,
            end_time,
            status: "Scheduled".to_owned(),
        };

        let created = self.api.create_assignment(&dto).await?;
        Ok(Assignment::from(created))
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: AssignmentStatus,
    ) -> Result<Assignment, CoreError> {
        let dto = UpdateAssignmentDto {
            status: status.to_wire().to_owned(),
        };
        let updated = self.api.update_assignment(id, &dto).await?;
        Ok(Assignment::from(updated))
    }
}

/// Parse a form timestamp and re-render it as RFC 3339 in UTC.
fn normalize_timestamp(raw: &str) -> Result<String, CoreError> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Forms may submit a bare local datetime without an offset.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
                .map(|naive| naive.and_utc())
        })
        .map_err(|_| CoreError::ValidationFailed {
            message: format!("invalid timestamp: {raw}"),
        })?;
    Ok(parsed.to_rfc3339())
}
