use strum::Display;

/// A completed or scheduled maintenance record.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRecord {
    pub id: String,
    pub vehicle_id: String,
    pub kind: MaintenanceType,
    pub cost: f64,
    pub date: String,
    pub provider: String,
    pub description: Option<String>,
}

/// Maintenance category vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MaintenanceType {
    Preventive,
    Repair,
    Inspection,
    Accident,
}

impl MaintenanceType {
    /// Map the backend type string. Unknown input defaults to `Preventive`.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Repair" => Self::Repair,
            "Inspection" => Self::Inspection,
            "Accident" => Self::Accident,
            _ => Self::Preventive,
        }
    }

    /// The wire string the backend expects on writes.
    pub fn to_wire(self) -> &'static str {
        match self {
            Self::Preventive => "Preventive",
            Self::Repair => "Repair",
            Self::Inspection => "Inspection",
            Self::Accident => "Accident",
        }
    }
}
