//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::model::{FieldChange, FormState};

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` applies these to the [`FormState`](crate::model::FormState) and
/// picks the next screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Apply a field change to the working record.
    Change(FieldChange),
    /// Validate and submit the working record.
    Submit,
    /// Reopen the submitted application for editing.
    Edit,
    /// Abandon the edit and start over with an empty form.
    Cancel,
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event against the current form and return an
    /// [`Action`] for the `App` to apply.
    fn handle_key(&mut self, form: &FormState, key: KeyEvent) -> Action;
}
