use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The application settings singleton. Mutated wholesale via a
/// full-object PUT, never partially.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub company_name: String,
    pub contact_email: String,
    pub phone_number: String,
    pub time_zone: String,
    pub address: String,
    pub distance_unit: String,
    pub currency: String,
    pub date_format: String,
    pub notify_maintenance_alerts: bool,
    pub notify_license_expiry: bool,
    pub notify_service_completion: bool,
    pub notify_payment: bool,
    pub notify_sms: bool,
    pub notify_desktop: bool,
    pub notify_weekly_summary: bool,
}

/// Distance unit preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum DistanceUnit {
    Miles,
    Kilometers,
}

/// Date rendering preference. Three formats only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum DateFormat {
    #[strum(serialize = "MM/DD/YYYY")]
    #[serde(rename = "MM/DD/YYYY")]
    MonthFirst,
    #[strum(serialize = "DD/MM/YYYY")]
    #[serde(rename = "DD/MM/YYYY")]
    DayFirst,
    #[strum(serialize = "YYYY-MM-DD")]
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
}

/// Durable per-user display preferences, kept in sync with backend
/// settings on every settings fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub distance_unit: DistanceUnit,
    /// Free-text label, e.g. `"USD ($)"`; the symbol in parentheses is
    /// what `format_currency` extracts.
    pub currency: String,
    pub date_format: DateFormat,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            distance_unit: DistanceUnit::Miles,
            currency: "USD ($)".to_owned(),
            date_format: DateFormat::MonthFirst,
        }
    }
}
