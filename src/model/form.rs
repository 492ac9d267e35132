//! The application form's state machine.
//!
//! [`FormState`] owns the working record, the submitted snapshot, and the
//! latest [`ErrorMap`]. Everything else reads it and mutates it through the
//! transitions defined here.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use thiserror::Error;
use tracing::{debug, info};

use super::position::Position;
use super::record::{ApplicationRecord, Field, TextField};
use super::skill::Skill;
use super::validation::{ErrorMap, validate};

/// Which view of the form is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormMode {
    /// Entering a new application.
    #[default]
    EditingFresh,
    /// Showing the read-only summary of a submitted application.
    Submitted,
    /// Revising a previously submitted application.
    EditingExisting,
}

impl FormMode {
    /// Returns `true` while the working record accepts changes.
    pub fn is_editing(self) -> bool {
        !matches!(self, FormMode::Submitted)
    }
}

#[mutants::skip]
impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormMode::EditingFresh => "editing a new application",
            FormMode::Submitted => "submitted",
            FormMode::EditingExisting => "editing a submitted application",
        })
    }
}

/// A change to a single field of the working record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// Replace the text of a free-text field.
    Text(TextField, String),
    /// Select a position (or clear the selection).
    Position(Option<Position>),
    /// Tick (`true`) or untick (`false`) one skill.
    Skill(Skill, bool),
}

impl FieldChange {
    /// The field this change targets.
    pub fn field(&self) -> Field {
        match self {
            FieldChange::Text(field, _) => Field::from(*field),
            FieldChange::Position(_) => Field::PositionApplyingFor,
            FieldChange::Skill(..) => Field::AdditionalSkills,
        }
    }
}

/// Operations that move the form between modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Set a field of the working record.
    Change,
    /// Validate and commit the working record.
    Submit,
    /// Reopen the submitted snapshot.
    Edit,
}

#[mutants::skip]
impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transition::Change => "change a field",
            Transition::Submit => "submit",
            Transition::Edit => "edit",
        })
    }
}

/// Source of the current time, truncated to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// The local wall clock.
    #[default]
    Local,
    /// A stopped clock.
    Fixed(NaiveDateTime),
}

impl Clock {
    /// Reads the clock. Seconds and below are dropped.
    pub fn now(self) -> NaiveDateTime {
        let now = match self {
            Clock::Local => Local::now().naive_local(),
            Clock::Fixed(t) => t,
        };
        now.with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now)
    }
}

/// Rejected form operations. None of these are fatal; the form is unchanged
/// apart from the stored [`ErrorMap`] on [`FormError::Invalid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Submission failed validation; the errors are available from [`FormState::errors`].
    #[error("{0} field(s) failed validation")]
    Invalid(usize),

    /// The operation is not available in the current mode.
    #[error("cannot {op} while {mode}")]
    InvalidTransition { op: Transition, mode: FormMode },

    /// The field is hidden for the selected position.
    #[error("{0} does not apply to the selected position")]
    InactiveField(TextField),
}

/// The live job application form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    record: ApplicationRecord,
    submitted: Option<ApplicationRecord>,
    errors: ErrorMap,
    mode: FormMode,
    clock: Clock,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Opens an empty form that reads the local wall clock.
    pub fn new() -> Self {
        Self::with_clock(Clock::Local)
    }

    /// Opens an empty form whose clock is stopped at `now`.
    pub fn frozen_at(now: NaiveDateTime) -> Self {
        Self::with_clock(Clock::Fixed(now))
    }

    /// Opens an empty form reading time from `clock`.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            record: ApplicationRecord::default(),
            submitted: None,
            errors: ErrorMap::default(),
            mode: FormMode::default(),
            clock,
        }
    }

    /// Replaces the clock used for the interview time bound.
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    /// The working record.
    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    /// The snapshot taken at the last successful submission.
    pub fn submitted(&self) -> Option<&ApplicationRecord> {
        self.submitted.as_ref()
    }

    /// Errors from the last submission attempt.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The current mode.
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// The earliest interview time the form accepts right now.
    pub fn earliest_interview_time(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Applies a single field change. Never validates.
    pub fn set_field(&mut self, change: FieldChange) -> Result<(), FormError> {
        match change {
            FieldChange::Text(field, value) => self.set_text(field, value),
            FieldChange::Position(position) => self.set_position(position),
            FieldChange::Skill(skill, included) => self.set_skill(skill, included),
        }
    }

    /// Replaces the text of `field`.
    ///
    /// Position-dependent fields only accept text while the selected position
    /// shows them, so hidden fields always stay empty.
    pub fn set_text(
        &mut self,
        field: TextField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.ensure(Transition::Change)?;
        if !Field::from(field).is_active_for(self.record.position_applying_for) {
            debug!(field = %field, "ignoring change to inactive field");
            return Err(FormError::InactiveField(field));
        }
        *self.record.text_mut(field) = value.into();
        debug!(field = %field, "field changed");
        Ok(())
    }

    /// Ticks or unticks one skill.
    pub fn set_skill(&mut self, skill: Skill, included: bool) -> Result<(), FormError> {
        self.ensure(Transition::Change)?;
        self.record.set_skill(skill, included);
        debug!(skill = %skill, included, "skill changed");
        Ok(())
    }

    /// Selects a position and discards every position-dependent value.
    pub fn set_position(&mut self, position: Option<Position>) -> Result<(), FormError> {
        self.ensure(Transition::Change)?;
        self.record.position_applying_for = position;
        self.record.clear_position_fields();
        debug!(position = ?position, "position changed");
        Ok(())
    }

    /// Validates the working record and, if it passes, commits it as the
    /// submitted snapshot.
    ///
    /// On failure the mode is unchanged and [`FormState::errors`] holds the
    /// fresh error map.
    pub fn submit(&mut self) -> Result<(), FormError> {
        self.ensure(Transition::Submit)?;
        self.errors = validate(&self.record, self.clock.now());
        if !self.errors.is_empty() {
            let count = self.errors.len();
            debug!(count, mode = ?self.mode, "submission rejected");
            return Err(FormError::Invalid(count));
        }
        self.submitted = Some(self.record.clone());
        self.mode = FormMode::Submitted;
        info!(position = ?self.record.position_applying_for, "application submitted");
        Ok(())
    }

    /// Reopens the submitted application for editing.
    pub fn edit(&mut self) -> Result<(), FormError> {
        match (&self.submitted, self.mode) {
            (Some(snapshot), FormMode::Submitted) => {
                self.record = snapshot.clone();
                self.errors = ErrorMap::default();
                self.mode = FormMode::EditingExisting;
                info!("editing submitted application");
                Ok(())
            }
            _ => {
                debug!(mode = ?self.mode, "edit rejected");
                Err(FormError::InvalidTransition {
                    op: Transition::Edit,
                    mode: self.mode,
                })
            }
        }
    }

    /// Discards every value, including the submitted snapshot, and starts a
    /// fresh application.
    pub fn reset(&mut self) {
        self.record = ApplicationRecord::default();
        self.submitted = None;
        self.errors = ErrorMap::default();
        self.mode = FormMode::EditingFresh;
        info!("form reset");
    }

    fn ensure(&self, op: Transition) -> Result<(), FormError> {
        if self.mode.is_editing() {
            Ok(())
        } else {
            debug!(%op, mode = ?self.mode, "transition rejected");
            Err(FormError::InvalidTransition {
                op,
                mode: self.mode,
            })
        }
    }
}
