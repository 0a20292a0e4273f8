// ── Display formatting and derivation ──
//
// Pure functions computing display strings from raw values. Everything
// fails soft: bad timestamps render as `"recently"`, unknown severities
// fall into the gray bucket, a missing baseline yields `None` rather
// than a division artifact.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::model::{DateFormat, UserPreferences};

// ── Percent change ──────────────────────────────────────────────────

/// Month-over-month percent change. `None` when either operand is
/// missing or the baseline is zero; callers render `None` as an em-dash.
pub fn percent_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let current = current?;
    let previous = previous?;
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Render a percent change with sign and one decimal; `None` as `"—"`.
pub fn format_percent_change(change: Option<f64>) -> String {
    match change {
        Some(value) => format!("{value:+.1}%"),
        None => "—".to_owned(),
    }
}

// ── Relative time ───────────────────────────────────────────────────

/// Relative time from an RFC 3339 timestamp, `"recently"` on bad input.
pub fn time_ago(raw: &str) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(raw) else {
        return "recently".to_owned();
    };
    humanize(Utc::now().signed_duration_since(then.with_timezone(&Utc)))
}

fn humanize(delta: chrono::Duration) -> String {
    let future = delta < chrono::Duration::zero();
    let secs = delta.num_seconds().abs();

    let phrase = if secs < 60 {
        "less than a minute".to_owned()
    } else if secs < 3600 {
        let mins = secs / 60;
        if mins == 1 {
            "1 minute".to_owned()
        } else {
            format!("{mins} minutes")
        }
    } else if secs < 86_400 {
        let hours = secs / 3600;
        if hours == 1 {
            "1 hour".to_owned()
        } else {
            format!("{hours} hours")
        }
    } else {
        let days = secs / 86_400;
        if days == 1 {
            "1 day".to_owned()
        } else {
            format!("{days} days")
        }
    };

    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

// ── Severity styling ────────────────────────────────────────────────

/// Text color class for a severity label. Matching is lowercase;
/// unrecognized severities land in the gray bucket.
pub fn severity_color(severity: &str) -> &'static str {
    match severity.to_lowercase().as_str() {
        "critical" => "text-red-500",
        "high" => "text-orange-500",
        "medium" => "text-yellow-500",
        "low" => "text-blue-500",
        _ => "text-gray-500",
    }
}

/// Badge classes for a severity label, same matching rules.
pub fn severity_badge_color(severity: &str) -> &'static str {
    match severity.to_lowercase().as_str() {
        "critical" => "bg-red-500/10 text-red-500 border-red-500/20",
        "high" => "bg-orange-500/10 text-orange-500 border-orange-500/20",
        "medium" => "bg-yellow-500/10 text-yellow-500 border-yellow-500/20",
        "low" => "bg-blue-500/10 text-blue-500 border-blue-500/20",
        _ => "bg-gray-500/10 text-gray-500 border-gray-500/20",
    }
}

/// Icon for an alert type, keyed on lowercase substrings.
pub fn alert_icon(kind: &str) -> &'static str {
    let lower = kind.to_lowercase();
    if lower.contains("maintenance") || lower.contains("service") {
        "🔧"
    } else if lower.contains("license") || lower.contains("expir") {
        "📋"
    } else if lower.contains("fuel") || lower.contains("gas") {
        "⛽"
    } else if lower.contains("accident") || lower.contains("damage") {
        "⚠️"
    } else if lower.contains("inspection") {
        "🔍"
    } else {
        "🔔"
    }
}

// ── Preference-driven formatting ────────────────────────────────────

static CURRENCY_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.+)\)").expect("static regex"));

/// Format an amount with the symbol extracted from the currency
/// preference label (`"USD ($)"` → `"$"`), `$` when none is found.
pub fn format_currency(amount: f64, preferences: &UserPreferences) -> String {
    let symbol = CURRENCY_SYMBOL
        .captures(&preferences.currency)
        .and_then(|c| c.get(1))
        .map_or("$", |m| m.as_str());
    format!("{symbol}{amount:.2}")
}

/// Format a distance with the lowercased unit label.
pub fn format_distance(distance: f64, preferences: &UserPreferences) -> String {
    format!(
        "{distance:.2} {}",
        preferences.distance_unit.to_string().to_lowercase()
    )
}

/// Format a `YYYY-MM-DD` or RFC 3339 date per the date-format
/// preference; unparseable input is returned as-is.
pub fn format_date(raw: &str, preferences: &UserPreferences) -> String {
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .ok()
        .or_else(|| chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

    let Some(date) = date else {
        return raw.to_owned();
    };

    let pattern = match preferences.date_format {
        DateFormat::DayFirst => "%d/%m/%Y",
        DateFormat::Iso => "%Y-%m-%d",
        DateFormat::MonthFirst => "%m/%d/%Y",
    };
    date.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DistanceUnit;

    #[test]
    fn percent_change_basics() {
        assert_eq!(percent_change(Some(120.0), Some(100.0)), Some(20.0));
        assert_eq!(percent_change(Some(100.0), Some(0.0)), None);
        assert_eq!(percent_change(None, Some(100.0)), None);
        assert_eq!(percent_change(Some(80.0), None), None);
        assert_eq!(percent_change(Some(50.0), Some(100.0)), Some(-50.0));
    }

    #[test]
    fn percent_change_rendering() {
        assert_eq!(format_percent_change(Some(20.0)), "+20.0%");
        assert_eq!(format_percent_change(Some(-12.5)), "-12.5%");
        assert_eq!(format_percent_change(None), "—");
    }

    #[test]
    fn time_ago_falls_back_on_bad_input() {
        assert_eq!(time_ago("not a timestamp"), "recently");
        assert_eq!(time_ago(""), "recently");
    }

    #[test]
    fn time_ago_humanizes() {
        let two_hours_ago = (Utc::now() - chrono::Duration::hours(2)).to_rfc3339();
        assert_eq!(time_ago(&two_hours_ago), "2 hours ago");

        let just_now = Utc::now().to_rfc3339();
        assert_eq!(time_ago(&just_now), "less than a minute ago");
    }

    #[test]
    fn severity_buckets() {
        assert_eq!(severity_color("Critical"), "text-red-500");
        assert_eq!(severity_color("high"), "text-orange-500");
        assert_eq!(severity_color("whatever"), "text-gray-500");
        assert_eq!(
            severity_badge_color("LOW"),
            "bg-blue-500/10 text-blue-500 border-blue-500/20"
        );
    }

    #[test]
    fn alert_icons() {
        assert_eq!(alert_icon("Scheduled Maintenance"), "🔧");
        assert_eq!(alert_icon("License Expiry"), "📋");
        assert_eq!(alert_icon("Fuel level"), "⛽");
        assert_eq!(alert_icon("Something else"), "🔔");
    }

    #[test]
    fn currency_symbol_extraction() {
        let usd = UserPreferences::default();
        assert_eq!(format_currency(1234.5, &usd), "$1234.50");

        let eur = UserPreferences {
            currency: "Euro (€)".to_owned(),
            ..UserPreferences::default()
        };
        assert_eq!(format_currency(10.0, &eur), "€10.00");

        let bare = UserPreferences {
            currency: "USD".to_owned(),
            ..UserPreferences::default()
        };
        assert_eq!(format_currency(10.0, &bare), "$10.00");
    }

    #[test]
    fn distance_uses_lowercased_unit() {
        let km = UserPreferences {
            distance_unit: DistanceUnit::Kilometers,
            ..UserPreferences::default()
        };
        assert_eq!(format_distance(12.345, &km), "12.35 kilometers");
    }

    #[test]
    fn date_formats() {
        let prefs = UserPreferences::default();
        assert_eq!(format_date("2025-06-15", &prefs), "06/15/2025");

        let day_first = UserPreferences {
            date_format: DateFormat::DayFirst,
            ..UserPreferences::default()
        };
        assert_eq!(format_date("2025-06-15", &day_first), "15/06/2025");
        assert_eq!(format_date("garbage", &day_first), "garbage");
    }
}
