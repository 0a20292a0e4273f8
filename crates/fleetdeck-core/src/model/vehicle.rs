use strum::Display;

/// A vehicle as the back office displays it.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: String,
    /// Composed display model, `"{make} {model}"`.
    pub model: String,
    pub category: String,
    pub status: VehicleStatus,
    pub mileage: i64,
    pub last_service: String,
    /// Utilization percentage, 0-100. Not backend-sourced yet; always 0.
    pub utilization: u8,
}

/// Narrow vehicle status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum VehicleStatus {
    Available,
    Assigned,
    #[strum(serialize = "In Maintenance")]
    InMaintenance,
}

impl VehicleStatus {
    /// Map the backend status string. Unknown input defaults to `Available`.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "InUse" => Self::Assigned,
            "Maintenance" => Self::InMaintenance,
            _ => Self::Available,
        }
    }

    /// The wire string the backend accepts on updates. Note the write
    /// vocabulary differs from the read one: the backend takes
    /// `"Assigned"` on writes but reports `"InUse"` on reads.
    pub fn to_wire(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Assigned => "Assigned",
            Self::InMaintenance => "Maintenance",
        }
    }
}
