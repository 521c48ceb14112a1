use chrono::{Months, NaiveDateTime};

use crate::models::event::DATETIME_FORMAT;
use crate::utils::error::FieldError;

const NAME_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 1000;
const ORGANIZER_MAX_CHARS: usize = 100;

pub fn validate_name(value: &str) -> Option<FieldError> {
    max_length("name", value, NAME_MAX_CHARS)
}

pub fn validate_description(value: &str) -> Option<FieldError> {
    max_length("description", value, DESCRIPTION_MAX_CHARS)
}

pub fn validate_organizer(value: &str) -> Option<FieldError> {
    max_length("organizer", value, ORGANIZER_MAX_CHARS)
}

/// Parses the timestamp against the fixed wire format and checks it against
/// the scheduling window: not in the past, not more than one year ahead of
/// `now`.
pub fn validate_datetime_of_event(
    value: &str,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, FieldError> {
    let parsed = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|_| {
        FieldError::new(
            "datetime_of_event",
            "must match the format YYYY-MM-DD HH:MM:SS",
        )
    })?;

    if parsed < now {
        return Err(FieldError::new(
            "datetime_of_event",
            "cannot organize an event in the past",
        ));
    }

    let horizon = now
        .checked_add_months(Months::new(12))
        .unwrap_or(NaiveDateTime::MAX);
    if parsed > horizon {
        return Err(FieldError::new(
            "datetime_of_event",
            "cannot organize more than one year in advance",
        ));
    }

    Ok(parsed)
}

fn max_length(field: &'static str, value: &str, max: usize) -> Option<FieldError> {
    if value.chars().count() > max {
        Some(FieldError::new(
            field,
            format!("must be at most {max} characters"),
        ))
    } else {
        None
    }
}
