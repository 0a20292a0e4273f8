// Two severity vocabularies coexist: the wire level is four-valued and
// capitalized, the dashboard level is three-valued and lowercase. They are
// two explicit types with one mapping function, never coerced.

use strum::Display;

/// A maintenance alert in the wire vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: String,
    pub entity_id: String,
    pub kind: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub is_resolved: bool,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

/// Wire-level severity, four-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    /// Map the backend severity string. Unknown input defaults to `Low`.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Medium" => Self::Medium,
            "High" => Self::High,
            "Critical" => Self::Critical,
            _ => Self::Low,
        }
    }

    /// The wire string the backend expects on writes.
    pub fn to_wire(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Collapse into the dashboard's three-valued vocabulary:
    /// `Critical` and `High` both render as high.
    pub fn ui_severity(self) -> UiSeverity {
        match self {
            Self::Critical | Self::High => UiSeverity::High,
            Self::Medium => UiSeverity::Medium,
            Self::Low => UiSeverity::Low,
        }
    }

    /// Whether the dashboard counts this alert as severe.
    pub fn is_severe(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// Dashboard-level severity, three-valued and lowercase in display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UiSeverity {
    #[strum(serialize = "low")]
    Low,
    #[strum(serialize = "medium")]
    Medium,
    #[strum(serialize = "high")]
    High,
}

/// An alert as the dashboard lists it: synthesized message, UI severity.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertNotice {
    pub id: String,
    pub message: String,
    pub severity: UiSeverity,
}
