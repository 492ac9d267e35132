use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use thiserror::Error;
use url::Url;

use super::position::Position;
use super::record::{ApplicationRecord, Field};
use super::skill::Skill;

/// Text format of the preferred interview time, as produced by a local date-time input.
pub const INTERVIEW_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const INTERVIEW_TIME_FORMAT_WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Required length of a phone number.
pub const PHONE_NUMBER_LEN: usize = 10;

/// A per-field validation failure, rendered inline next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(Field),
    #[error("Email is invalid")]
    InvalidEmail,
    #[error("Phone Number must be a valid number")]
    PhoneNotNumeric,
    #[error("Phone Number must be exactly 10 digits")]
    PhoneLength,
    #[error("Relevant Experience must be a number greater than 0")]
    InvalidExperience,
    #[error("Portfolio URL is not valid")]
    InvalidPortfolioUrl,
    #[error("At least one skill must be selected")]
    NoSkillSelected,
    #[error("Preferred Interview Time must look like 2030-01-01T10:00")]
    InvalidInterviewTime,
    #[error("Preferred Interview Time cannot be earlier than {0}")]
    InterviewTimeInPast(String),
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid hardcoded regex"));

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)$").expect("valid hardcoded regex")
});

/// One optional error per [`Field`].
///
/// Built wholesale by [`validate`]; a field without an entry passed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorMap {
    entries: [Option<ValidationError>; Field::COUNT],
}

impl ErrorMap {
    /// Returns the error recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.entries[field.index()].as_ref()
    }

    /// Returns `true` when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Number of fields with an error.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Iterates over failing fields in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        Field::ALL
            .into_iter()
            .zip(self.entries.iter())
            .filter_map(|(field, entry)| entry.as_ref().map(|e| (field, e)))
    }

    fn record(&mut self, field: Field, result: Result<(), ValidationError>) {
        self.entries[field.index()] = result.err();
    }
}

/// Runs every field rule against `record`.
///
/// `not_before` is the earliest acceptable interview time, normally the
/// moment the form was opened.
pub fn validate(record: &ApplicationRecord, not_before: NaiveDateTime) -> ErrorMap {
    let position = record.position_applying_for;
    let mut errors = ErrorMap::default();

    errors.record(Field::FullName, validate_full_name(&record.full_name));
    errors.record(Field::Email, validate_email(&record.email));
    errors.record(Field::PhoneNumber, validate_phone_number(&record.phone_number));
    errors.record(Field::PositionApplyingFor, validate_position(position));
    errors.record(
        Field::RelevantExperience,
        validate_relevant_experience(position, &record.relevant_experience),
    );
    errors.record(
        Field::PortfolioUrl,
        validate_portfolio_url(position, &record.portfolio_url),
    );
    errors.record(
        Field::ManagementExperience,
        validate_management_experience(position, &record.management_experience),
    );
    errors.record(
        Field::AdditionalSkills,
        validate_skills(&record.additional_skills),
    );
    errors.record(
        Field::PreferredInterviewTime,
        validate_interview_time(&record.preferred_interview_time, not_before),
    );

    errors
}

/// Validates the applicant's name: must be non-empty.
pub fn validate_full_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        Err(ValidationError::Required(Field::FullName))
    } else {
        Ok(())
    }
}

/// Validates an email address against a loose `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    match email {
        "" => Err(ValidationError::Required(Field::Email)),
        s if EMAIL_RE.is_match(s) => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

/// Validates a phone number: exactly ten ASCII digits, checked on the raw text.
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        Err(ValidationError::Required(Field::PhoneNumber))
    } else if !phone.chars().all(|c| c.is_ascii_digit()) {
        Err(ValidationError::PhoneNotNumeric)
    } else if phone.len() != PHONE_NUMBER_LEN {
        Err(ValidationError::PhoneLength)
    } else {
        Ok(())
    }
}

/// Validates that a position has been chosen.
pub fn validate_position(position: Option<Position>) -> Result<(), ValidationError> {
    position
        .map(|_| ())
        .ok_or(ValidationError::Required(Field::PositionApplyingFor))
}

/// Validates years of experience: required for Developer and Designer, and
/// when present must be a number greater than zero.
pub fn validate_relevant_experience(
    position: Option<Position>,
    years: &str,
) -> Result<(), ValidationError> {
    let required = position.is_some_and(|p| p.requires_experience());
    if years.is_empty() {
        return if required {
            Err(ValidationError::Required(Field::RelevantExperience))
        } else {
            Ok(())
        };
    }
    match parse_number(years) {
        Some(n) if n > 0.0 => Ok(()),
        _ => Err(ValidationError::InvalidExperience),
    }
}

/// Validates the portfolio link: required for Designer, and when present
/// must parse as an absolute URL.
pub fn validate_portfolio_url(
    position: Option<Position>,
    url: &str,
) -> Result<(), ValidationError> {
    let required = position.is_some_and(|p| p.requires_portfolio());
    if url.is_empty() {
        return if required {
            Err(ValidationError::Required(Field::PortfolioUrl))
        } else {
            Ok(())
        };
    }
    match Url::parse(url) {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::debug!(error = %e, "portfolio URL rejected");
            Err(ValidationError::InvalidPortfolioUrl)
        }
    }
}

/// Validates the management background: required for Manager only.
pub fn validate_management_experience(
    position: Option<Position>,
    experience: &str,
) -> Result<(), ValidationError> {
    let required = position.is_some_and(|p| p.requires_management_experience());
    if required && experience.is_empty() {
        Err(ValidationError::Required(Field::ManagementExperience))
    } else {
        Ok(())
    }
}

/// Validates that at least one skill is ticked.
pub fn validate_skills(skills: &[Skill]) -> Result<(), ValidationError> {
    if skills.is_empty() {
        Err(ValidationError::NoSkillSelected)
    } else {
        Ok(())
    }
}

/// Validates the preferred interview time: required, well-formed, and not
/// earlier than `not_before`.
pub fn validate_interview_time(
    time: &str,
    not_before: NaiveDateTime,
) -> Result<(), ValidationError> {
    if time.is_empty() {
        return Err(ValidationError::Required(Field::PreferredInterviewTime));
    }
    let parsed = parse_interview_time(time).ok_or(ValidationError::InvalidInterviewTime)?;
    if parsed < not_before {
        return Err(ValidationError::InterviewTimeInPast(
            not_before.format(INTERVIEW_TIME_FORMAT).to_string(),
        ));
    }
    Ok(())
}

/// Parses `YYYY-MM-DDTHH:MM`, with optional `:SS`.
pub fn parse_interview_time(time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(time, INTERVIEW_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(time, INTERVIEW_TIME_FORMAT_WITH_SECONDS))
        .ok()
}

/// Parses a signed base-10 integer or decimal. Whitespace, exponents, and
/// special values such as `inf` are rejected.
fn parse_number(s: &str) -> Option<f64> {
    if NUMBER_RE.is_match(s) {
        s.parse().ok()
    } else {
        None
    }
}
