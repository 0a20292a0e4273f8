use std::sync::Arc;

use tracing::warn;

use fleetdeck_api::ApiClient;

use crate::model::{MonthlyFinancialSummary, VehicleProfitability};

/// Adapts the financial reporting endpoints to view models. Wire
/// decimal strings are coerced to numbers for chart and aggregate use.
#[derive(Clone)]
pub struct FinancialService {
    api: Arc<ApiClient>,
}

impl FinancialService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Month-keyed summary, optionally bounded; degrades to empty on
    /// failure.
    pub async fn monthly_summary(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Vec<MonthlyFinancialSummary> {
        match self.api.financial_summary(start_date, end_date).await {
            Ok(dtos) => dtos
                .into_iter()
                .map(MonthlyFinancialSummary::from)
                .collect(),
            Err(err) => {
                warn!("failed to fetch financial summary: {err}");
                Vec::new()
            }
        }
    }

    /// Per-vehicle profitability ranking; degrades to empty on failure.
    pub async fn vehicle_profitability(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Vec<VehicleProfitability> {
        match self.api.vehicle_profitability(start_date, end_date).await {
            Ok(dtos) => dtos.into_iter().map(VehicleProfitability::from).collect(),
            Err(err) => {
                warn!("failed to fetch vehicle profitability: {err}");
                Vec::new()
            }
        }
    }
}
