/// Month-keyed revenue/cost/profit figures, wire decimal strings coerced
/// to numbers for chart and aggregate use.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyFinancialSummary {
    pub month: String,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

/// Per-vehicle profitability ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleProfitability {
    pub vehicle_id: String,
    pub vehicle_plate: String,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub rank: i32,
}
