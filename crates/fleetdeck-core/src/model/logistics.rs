use strum::Display;

/// A transport job joined with its customer, route, and shipments, as
/// the services page lists it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportService {
    pub id: String,
    /// Customer name, falling back to the raw customer id when the
    /// customer lookup fails.
    pub client: String,
    /// Rendered `"lat, lng"` (5 decimals) or `"—"`.
    pub origin: String,
    pub destination: String,
    /// First shipment's type, `"—"` when there are no shipments.
    pub load_type: String,
    pub service_fee: f64,
    /// Not backend-sourced yet; always `None`.
    pub cost: Option<f64>,
    pub payment_status: PaymentStatus,
    pub status: ServiceStatus,
    /// Not backend-sourced yet; always `None`.
    pub assigned_vehicle: Option<String>,
    pub assigned_driver: Option<String>,
    /// Creation date, `YYYY-MM-DD`, or `"—"`.
    pub date: String,
}

/// Delivery progress vocabulary, derived from the job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ServiceStatus {
    Scheduled,
    #[strum(serialize = "In Progress")]
    InProgress,
    Delivered,
}

impl ServiceStatus {
    /// Map the job status string. `Delivered`, `Invoiced`, and `Paid`
    /// all mean the goods have moved; unknown input defaults to
    /// `Scheduled`.
    pub fn from_job_status(raw: &str) -> Self {
        match raw {
            "InProgress" => Self::InProgress,
            "Delivered" | "Invoiced" | "Paid" => Self::Delivered,
            _ => Self::Scheduled,
        }
    }
}

/// Billing progress vocabulary, derived from the same job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PaymentStatus {
    Pending,
    Invoiced,
    Paid,
}

impl PaymentStatus {
    /// Unknown input defaults to `Pending`.
    pub fn from_job_status(raw: &str) -> Self {
        match raw {
            "Paid" => Self::Paid,
            "Invoiced" => Self::Invoiced,
            _ => Self::Pending,
        }
    }
}
