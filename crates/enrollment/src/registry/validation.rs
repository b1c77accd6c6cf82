use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::domain::{DependentDraft, DependentFields, EnrolleeDraft, EnrolleeFields};

/// Field name to violation message. Keyed by field name, so when several
/// constraints on the same field fail the last check wins.
pub type FieldViolations = BTreeMap<&'static str, String>;

const NAME_MAX_CHARS: usize = 128;
const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 15;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Check an enrollee draft against every declared constraint.
///
/// All fields are checked, not just the first failing one; the result is
/// either the full validated field set or the complete violation map.
pub fn validate_enrollee(draft: &EnrolleeDraft) -> Result<EnrolleeFields, FieldViolations> {
    let mut violations = FieldViolations::new();

    let name = checked_name(draft.name.as_deref(), &mut violations);
    let activation_status = draft.activation_status;
    if activation_status.is_none() {
        violations.insert("activation_status", "activation status is required".to_string());
    }
    let birth_date = checked_birth_date(draft.birth_date.as_deref(), &mut violations);
    let phone_number = checked_phone_number(draft.phone_number.as_deref(), &mut violations);

    if violations.is_empty() {
        if let (Some(name), Some(activation_status), Some(birth_date)) =
            (name, activation_status, birth_date)
        {
            return Ok(EnrolleeFields {
                name,
                activation_status,
                birth_date,
                phone_number,
            });
        }
    }

    Err(violations)
}

/// Check a dependent draft against every declared constraint.
pub fn validate_dependent(draft: &DependentDraft) -> Result<DependentFields, FieldViolations> {
    let mut violations = FieldViolations::new();

    let name = checked_name(draft.name.as_deref(), &mut violations);
    let birth_date = checked_birth_date(draft.birth_date.as_deref(), &mut violations);

    if violations.is_empty() {
        if let (Some(name), Some(birth_date)) = (name, birth_date) {
            return Ok(DependentFields { name, birth_date });
        }
    }

    Err(violations)
}

fn checked_name(raw: Option<&str>, violations: &mut FieldViolations) -> Option<String> {
    let Some(raw) = raw else {
        violations.insert("name", "name is required".to_string());
        return None;
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        violations.insert("name", "name must not be blank".to_string());
        return None;
    }
    if trimmed.chars().count() > NAME_MAX_CHARS {
        violations.insert(
            "name",
            format!("name must be at most {NAME_MAX_CHARS} characters"),
        );
        return None;
    }

    Some(trimmed.to_string())
}

fn checked_birth_date(raw: Option<&str>, violations: &mut FieldViolations) -> Option<NaiveDate> {
    let Some(raw) = raw else {
        violations.insert("birth_date", "birth date is required".to_string());
        return None;
    };

    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            violations.insert(
                "birth_date",
                format!("birth date must be formatted as YYYY-MM-DD, got '{raw}'"),
            );
            None
        }
    }
}

fn checked_phone_number(raw: Option<&str>, violations: &mut FieldViolations) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let well_formed = digits.len() >= PHONE_MIN_DIGITS
        && digits.len() <= PHONE_MAX_DIGITS
        && digits.chars().all(|c| c.is_ascii_digit());

    if !well_formed {
        violations.insert(
            "phone_number",
            format!(
                "phone number must be {PHONE_MIN_DIGITS} to {PHONE_MAX_DIGITS} digits, optionally prefixed with '+'"
            ),
        );
        return None;
    }

    Some(trimmed.to_string())
}
