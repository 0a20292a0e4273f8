use std::sync::Arc;

use futures::future::join3;
use tracing::warn;

use fleetdeck_api::ApiClient;
use fleetdeck_api::types::{
    CreateCustomerDto, CreateRouteDto, CreateShipmentDto, CreateTransportJobDto, CustomerDto,
    RouteDto, ShipmentDto, TransportJobDto,
};

use crate::convert::{date_part, format_geo_point, parse_money};
use crate::error::CoreError;
use crate::model::{PaymentStatus, ServiceStatus, TransportService};

/// Adapts the logistics endpoints (customers, jobs, routes, shipments)
/// into the joined `TransportService` rows the services page lists.
#[derive(Clone)]
pub struct LogisticsService {
    api: Arc<ApiClient>,
}

impl LogisticsService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// All transport services, newest first; degrades to empty on failure.
    ///
    /// Each row joins the job with its customer, route, and shipments.
    /// The per-job lookups fail independently: a missing customer falls
    /// back to the raw id, a missing route renders as `"—"`.
    pub async fn get_all(&self) -> Vec<TransportService> {
        let jobs = match self.api.list_jobs().await {
            Ok(jobs) => jobs,
            Err(err) => {
                warn!("failed to fetch transport jobs: {err}");
                return Vec::new();
            }
        };

        let mut rows = Vec::with_capacity(jobs.len());
        for job in jobs {
            rows.push(self.build_row(job).await);
        }
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    /// One transport service. No dedicated endpoint; reuses the list.
    pub async fn get_by_id(&self, id: &str) -> Option<TransportService> {
        self.get_all().await.into_iter().find(|s| s.id == id)
    }

    async fn build_row(&self, job: TransportJobDto) -> TransportService {
        let (customer, route, shipments) = join3(
            self.api.get_customer(&job.customer_id),
            self.api.get_route_for_job(&job.id),
            self.api.list_shipments_for_job(&job.id),
        )
        .await;

        let customer = customer.ok();
        let route = route.ok().flatten();
        let shipments = shipments.unwrap_or_default();
        let status = job.status.as_deref().unwrap_or("");

        TransportService {
            id: job.id.clone(),
            client: customer
                .and_then(|c| c.name)
                .unwrap_or_else(|| job.customer_id.clone()),
            origin: route
                .as_ref()
                .map_or_else(|| "—".to_owned(), |r| format_geo_point(r.origin.as_ref())),
            destination: route.as_ref().map_or_else(
                || "—".to_owned(),
                |r| format_geo_point(r.destination.as_ref()),
            ),
            load_type: shipments
                .first()
                .and_then(|s| s.kind.clone())
                .unwrap_or_else(|| "—".to_owned()),
            service_fee: parse_money(job.agreed_price.as_deref()),
            // Not backend-sourced yet.
            cost: None,
            payment_status: PaymentStatus::from_job_status(status),
            status: ServiceStatus::from_job_status(status),
            assigned_vehicle: None,
            assigned_driver: None,
            date: date_part(job.created_at.as_deref()),
        }
    }

    // ── Create operations (raw DTO passthrough) ──────────────────────

    pub async fn create_customer(&self, dto: &CreateCustomerDto) -> Result<CustomerDto, CoreError> {
        Ok(self.api.create_customer(dto).await?)
    }

    pub async fn create_job(&self, dto: &CreateTransportJobDto) -> Result<TransportJobDto, CoreError> {
        Ok(self.api.create_job(dto).await?)
    }

    pub async fn create_route(&self, dto: &CreateRouteDto) -> Result<RouteDto, CoreError> {
        Ok(self.api.create_route(dto).await?)
    }

    pub async fn create_shipment(&self, dto: &CreateShipmentDto) -> Result<ShipmentDto, CoreError> {
        Ok(self.api.create_shipment(dto).await?)
    }

    /// Raw customer list for form dropdowns; degrades to empty on failure.
    pub async fn list_customers(&self) -> Vec<CustomerDto> {
        match self.api.list_customers().await {
            Ok(customers) => customers,
            Err(err) => {
                warn!("failed to fetch customers: {err}");
                Vec::new()
            }
        }
    }
}
