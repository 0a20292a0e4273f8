// ── Form validation ──
//
// Pure, synchronous, no I/O. Each form validator takes a partial input
// record and returns a field-keyed error map with a fixed message per
// field; the first failing rule wins. Validation never raises: a bad
// date string is simply invalid, not a panic.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Fixed user-facing validation messages.
pub mod messages {
    pub const INVALID_EMAIL: &str = "Please enter a valid email address";
    pub const INVALID_PHONE: &str = "Please enter a valid phone number (10+ digits)";
    pub const INVALID_LICENSE: &str = "License number must be 5-20 characters";
    pub const REQUIRED_FIELD: &str = "This field is required";
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
    pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
    pub const DUPLICATE_LICENSE: &str = "A driver with this license number already exists";
    pub const INVALID_DATE: &str = "Please enter a valid date";
    pub const END_DATE_BEFORE_START: &str = "End date must be after start date";
    pub const INVALID_COST: &str = "Cost must be a positive number";
    pub const INVALID_MILEAGE: &str = "Mileage must be a positive number";
}

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex")
});

// ── Field rules ─────────────────────────────────────────────────────

/// Two-part email shape: `local@domain.tld`.
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Strips non-digit characters, then requires at least 10 digits.
pub fn validate_phone(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() >= 10
}

/// License number length in [5, 20].
pub fn validate_license(license: &str) -> bool {
    (5..=20).contains(&license.chars().count())
}

pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= 8
}

/// Cost must parse and be strictly positive.
pub fn validate_cost(cost: &str) -> bool {
    cost.trim().parse::<f64>().is_ok_and(|n| n > 0.0)
}

/// Mileage must parse and be non-negative.
pub fn validate_mileage(mileage: &str) -> bool {
    mileage.trim().parse::<f64>().is_ok_and(|n| n >= 0.0)
}

/// End strictly after start. Unparseable dates are invalid, never a
/// panic. Accepts `YYYY-MM-DD` or full RFC 3339.
pub fn validate_date_range(start: &str, end: &str) -> bool {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => e > s,
        _ => false,
    }
}

fn parse_date(raw: &str) -> Option<chrono::NaiveDateTime> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// ── Form validators ─────────────────────────────────────────────────

/// The outcome of validating one form: a validity flag plus one fixed
/// message per failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Vehicle form: model, type, and status are required.
pub fn validate_vehicle_form(
    model: Option<&str>,
    kind: Option<&str>,
    status: Option<&str>,
) -> ValidationResult {
    let mut errors = BTreeMap::new();

    if is_blank(model) {
        errors.insert("model".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }
    if kind.is_none() {
        errors.insert("type".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }
    if status.is_none() {
        errors.insert("status".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }

    ValidationResult::from_errors(errors)
}

/// Driver form input, all fields optional until submitted.
#[derive(Debug, Clone, Default)]
pub struct DriverForm<'a> {
    pub name: Option<&'a str>,
    pub license: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub availability: Option<&'a str>,
}

pub fn validate_driver_form(form: &DriverForm<'_>) -> ValidationResult {
    let mut errors = BTreeMap::new();

    if is_blank(form.name) {
        errors.insert("name".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }

    if is_blank(form.license) {
        errors.insert("license".to_owned(), messages::REQUIRED_FIELD.to_owned());
    } else if let Some(license) = form.license {
        if !validate_license(license) {
            errors.insert("license".to_owned(), messages::INVALID_LICENSE.to_owned());
        }
    }

    if let Some(email) = form.email {
        if !email.is_empty() && !validate_email(email) {
            errors.insert("email".to_owned(), messages::INVALID_EMAIL.to_owned());
        }
    }

    if let Some(phone) = form.phone {
        if !phone.is_empty() && !validate_phone(phone) {
            errors.insert("phone".to_owned(), messages::INVALID_PHONE.to_owned());
        }
    }

    if form.availability.is_none() {
        errors.insert(
            "availability".to_owned(),
            messages::REQUIRED_FIELD.to_owned(),
        );
    }

    ValidationResult::from_errors(errors)
}

/// Login/registration form: email and password.
pub fn validate_auth_form(email: Option<&str>, password: Option<&str>) -> ValidationResult {
    let mut errors = BTreeMap::new();

    if is_blank(email) {
        errors.insert("email".to_owned(), messages::REQUIRED_FIELD.to_owned());
    } else if let Some(email) = email {
        if !validate_email(email) {
            errors.insert("email".to_owned(), messages::INVALID_EMAIL.to_owned());
        }
    }

    match password {
        None | Some("") => {
            errors.insert("password".to_owned(), messages::REQUIRED_FIELD.to_owned());
        }
        Some(password) if !validate_password(password) => {
            errors.insert(
                "password".to_owned(),
                messages::PASSWORD_TOO_SHORT.to_owned(),
            );
        }
        Some(_) => {}
    }

    ValidationResult::from_errors(errors)
}

/// Assignment form input.
#[derive(Debug, Clone, Default)]
pub struct AssignmentForm<'a> {
    pub vehicle_id: Option<&'a str>,
    pub driver_id: Option<&'a str>,
    pub start_date: Option<&'a str>,
    pub end_date: Option<&'a str>,
}

pub fn validate_assignment_form(form: &AssignmentForm<'_>) -> ValidationResult {
    let mut errors = BTreeMap::new();

    if form.vehicle_id.is_none() {
        errors.insert("vehicleId".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }
    if form.driver_id.is_none() {
        errors.insert("driverId".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }
    if form.start_date.is_none() {
        errors.insert("startDate".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }

    match (form.start_date, form.end_date) {
        (_, None) => {
            errors.insert("endDate".to_owned(), messages::REQUIRED_FIELD.to_owned());
        }
        (Some(start), Some(end)) if !validate_date_range(start, end) => {
            errors.insert(
                "endDate".to_owned(),
                messages::END_DATE_BEFORE_START.to_owned(),
            );
        }
        _ => {}
    }

    ValidationResult::from_errors(errors)
}

/// Maintenance record form input.
#[derive(Debug, Clone, Default)]
pub struct MaintenanceForm<'a> {
    pub vehicle_id: Option<&'a str>,
    pub kind: Option<&'a str>,
    pub cost: Option<&'a str>,
    pub provider: Option<&'a str>,
    pub date: Option<&'a str>,
}

pub fn validate_maintenance_form(form: &MaintenanceForm<'_>) -> ValidationResult {
    let mut errors = BTreeMap::new();

    if form.vehicle_id.is_none() {
        errors.insert("vehicleId".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }
    if form.kind.is_none() {
        errors.insert("type".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }

    match form.cost {
        None | Some("") => {
            errors.insert("cost".to_owned(), messages::REQUIRED_FIELD.to_owned());
        }
        Some(cost) if !validate_cost(cost) => {
            errors.insert("cost".to_owned(), messages::INVALID_COST.to_owned());
        }
        Some(_) => {}
    }

    if is_blank(form.provider) {
        errors.insert("provider".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }
    if form.date.is_none() {
        errors.insert("date".to_owned(), messages::REQUIRED_FIELD.to_owned());
    }

    ValidationResult::from_errors(errors)
}
