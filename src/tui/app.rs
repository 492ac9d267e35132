use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tracing::debug;

use crate::model::{FormMode, FormState};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    ApplicationFormState, HelpState, SummaryState, draw_application_form, draw_help, draw_summary,
};
use super::widgets::{StatusBarContext, draw_status_bar};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Fill in or edit the application.
    Form,
    /// Read-only view of the submitted application.
    Summary,
    /// Show keybinding help.
    Help,
}

impl Screen {
    /// Human-readable name, used in the help title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Form => "Application Form",
            Self::Summary => "Submission Summary",
            Self::Help => "Help",
        }
    }
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    form: FormState,
    form_screen: ApplicationFormState,
    summary: SummaryState,
    help: HelpState,
    should_quit: bool,
}

impl App {
    /// Creates an `App` showing the screen that matches the form's mode.
    pub fn new(form: FormState) -> Self {
        let screen = screen_for(form.mode());
        Self {
            screen,
            form,
            form_screen: ApplicationFormState::new(),
            summary: SummaryState,
            help: HelpState::new(),
            should_quit: false,
        }
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::Form => {
                draw_application_form(&self.form_screen, &self.form, frame, main_area)
            }
            Screen::Summary => draw_summary(&self.form, frame, main_area),
            Screen::Help => draw_help(&self.help, frame, main_area),
        }

        draw_status_bar(&StatusBarContext::from_form(&self.form), frame, status_area);
    }

    /// Handles a key event: F1 first, then the current screen's handler.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.help.set_origin(self.screen);
                self.help.reset();
                self.screen = Screen::Help;
            }
            return;
        }

        let action = match self.screen {
            Screen::Form => self.form_screen.handle_key(&self.form, key),
            Screen::Summary => self.summary.handle_key(&self.form, key),
            Screen::Help => self.help.handle_key(&self.form, key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.screen = screen,
            Action::Change(change) => {
                if let Err(e) = self.form.set_field(change) {
                    debug!(error = %e, "change rejected");
                }
            }
            Action::Submit => {
                if let Err(e) = self.form.submit() {
                    debug!(error = %e, "submit failed");
                }
                self.screen = screen_for(self.form.mode());
            }
            Action::Edit => {
                if let Err(e) = self.form.edit() {
                    debug!(error = %e, "edit failed");
                }
                self.form_screen.reset();
                self.screen = screen_for(self.form.mode());
            }
            Action::Cancel => {
                self.form.reset();
                self.form_screen.reset();
                self.screen = Screen::Form;
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the form driving the UI.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Consumes the app, handing back the form.
    pub fn into_form(self) -> FormState {
        self.form
    }
}

fn screen_for(mode: FormMode) -> Screen {
    match mode {
        FormMode::Submitted => Screen::Summary,
        FormMode::EditingFresh | FormMode::EditingExisting => Screen::Form,
    }
}
