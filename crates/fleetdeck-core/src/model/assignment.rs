use strum::Display;

/// A vehicle/driver assignment as the back office displays it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub vehicle_id: String,
    pub driver_id: String,
    /// Joined display names, present only where the caller built them.
    pub vehicle_name: Option<String>,
    pub driver_name: Option<String>,
    pub status: AssignmentStatus,
    pub start_date: String,
    pub end_date: Option<String>,
    /// Not backend-sourced yet; always `"Unknown"`.
    pub location: String,
    /// Completion percentage, 0-100. Inferred from status on the
    /// dashboard, 0 in list views, until a true progress source exists.
    pub progress: u8,
}

/// Assignment lifecycle vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AssignmentStatus {
    Active,
    Completed,
    Scheduled,
    Cancelled,
}

impl AssignmentStatus {
    /// Map the backend status string. Unknown input defaults to `Scheduled`.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Active" => Self::Active,
            "Completed" => Self::Completed,
            "Cancelled" => Self::Cancelled,
            _ => Self::Scheduled,
        }
    }

    /// The wire string the backend expects on writes.
    pub fn to_wire(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Scheduled => "Scheduled",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Dashboard progress inference: `Completed` is done, `Active` is
    /// assumed halfway, everything else has not started.
    pub fn inferred_progress(self) -> u8 {
        match self {
            Self::Completed => 100,
            Self::Active => 50,
            Self::Scheduled | Self::Cancelled => 0,
        }
    }
}
