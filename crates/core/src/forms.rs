//! Presentation form fields and their validation rules.
//!
//! Every rule is evaluated independently (no short-circuiting) and all
//! failures are reported together as human-readable messages, so a
//! submission with several bad fields comes back with the full list.

use std::sync::LazyLock;

use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

/// Letters, whitespace, `&`, `-`, and `.` only. No digits.
static PRESENTERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s&\-\.]+$").expect("presenters pattern is valid"));

/// Loose time-range pattern: `9-10am`, `10:30am-11:00am`, `9:30-11:40`.
///
/// Hour and minute values are not range-checked; only the shape is.
static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<fromhour>\d{1,2})\s*(:\s*(?P<fromminute>\d{1,2}))?\s*(?P<fromampm>am|pm)?\s*-\s*(?P<tohour>\d{1,2})\s*(:\s*(?P<tominute>\d{1,2}))?\s*(?P<toampm>am|pm)?$",
    )
    .expect("time range pattern is valid")
});

/// Field evaluation order for error reporting.
const FIELD_ORDER: &[&str] = &["title", "presenters", "scheduled", "time_range"];

/// Raw submitted fields for creating or editing a presentation.
///
/// Fields arrive as strings straight from the form; `notes` is free text
/// with no rules attached.
#[derive(Debug, Clone, Default, Validate)]
pub struct PresentationForm {
    #[validate(length(min = 4, message = "Title has to be at least 4 characters long"))]
    pub title: String,

    #[validate(
        length(
            min = 4,
            message = "List of presenters has to be at least 4 alphabetical characters long"
        ),
        regex(
            path = *PRESENTERS_RE,
            message = "Only alphabetical characters are allowed in the presenters list"
        )
    )]
    pub presenters: String,

    #[validate(custom(function = validate_scheduled))]
    pub scheduled: String,

    #[validate(regex(
        path = *TIME_RANGE_RE,
        message = "Time range format is invalid. Examples of valid inputs are 11-1pm, 10:30am-11:00am, etc."
    ))]
    pub time_range: String,

    pub notes: String,
}

impl PresentationForm {
    /// The parsed `scheduled` date, `None` when the field is not a valid
    /// `YYYY-MM-DD` date.
    pub fn scheduled_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.scheduled, "%Y-%m-%d").ok()
    }
}

fn validate_scheduled(value: &str) -> Result<(), ValidationError> {
    if chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("scheduled")
            .with_message("Date must be a valid date in YYYY-MM-DD format".into()))
    }
}

/// Run every rule and collect all failure messages in stable field order.
pub fn validate_form(form: &PresentationForm) -> Result<(), Vec<String>> {
    match form.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(collect_messages(&errors)),
    }
}

fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let by_field = errors.field_errors();
    let mut messages = Vec::new();
    for field in FIELD_ORDER {
        if let Some(list) = by_field.get(*field) {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}"));
                messages.push(message);
            }
        }
    }
    messages
}
