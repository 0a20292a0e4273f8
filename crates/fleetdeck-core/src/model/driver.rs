use strum::Display;

/// A driver as the back office displays it.
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub license: String,
    pub license_expiry: String,
    pub availability: DriverAvailability,
    /// Not backend-sourced yet; always 0.
    pub hours_this_week: u32,
    pub wage_rate: f64,
    pub phone: String,
    pub email: String,
}

/// Driver availability vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DriverAvailability {
    Available,
    #[strum(serialize = "On Duty")]
    OnDuty,
    #[strum(serialize = "Off Duty")]
    OffDuty,
}

impl DriverAvailability {
    /// Map the backend status string. Unknown input defaults to `OffDuty`.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Available" => Self::Available,
            "OnDuty" => Self::OnDuty,
            "OffDuty" => Self::OffDuty,
            _ => Self::OffDuty,
        }
    }

    /// Map the coarser status the backend returns on write responses:
    /// `"Active"` means available, anything else off duty. Lossy by design.
    pub fn from_write_status(raw: &str) -> Self {
        if raw == "Active" {
            Self::Available
        } else {
            Self::OffDuty
        }
    }

    /// The wire string the backend expects on writes.
    pub fn to_wire(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OnDuty => "OnDuty",
            Self::OffDuty => "OffDuty",
        }
    }
}
