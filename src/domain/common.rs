use chrono::NaiveDate;

/// Exposes a stable identifier for seeded entities.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a user-entered amount, coercing anything that is not a finite,
/// non-negative number to `0.0`.
pub fn parse_amount(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) => sanitize_amount(value),
        Err(_) => 0.0,
    }
}

/// Clamps an already-parsed amount into the valid monetary range.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parses an ISO `YYYY-MM-DD` due date. Blank or malformed input yields `None`.
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT).ok()
}
