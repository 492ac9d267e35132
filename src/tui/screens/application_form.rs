//! Application form screen: the data entry view for new and edited applications.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{
    Field, FieldChange, FormMode, FormState, INTERVIEW_TIME_FORMAT, Position, Skill,
};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::form::{Form, FormField, draw_form};

/// Choices offered by the position selector, in cycling order.
static POSITION_OPTIONS: &[Option<Position>] = &[
    None,
    Some(Position::Developer),
    Some(Position::Designer),
    Some(Position::Manager),
];

/// Placeholder shown while no position is selected.
const NO_POSITION: &str = "Select Position";

/// State for the application form screen.
#[derive(Debug, Clone)]
pub struct ApplicationFormState {
    focus: Field,
    skill_cursor: usize,
}

impl Default for ApplicationFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationFormState {
    /// Creates the screen state with focus on the first field.
    pub fn new() -> Self {
        Self {
            focus: Field::FullName,
            skill_cursor: 0,
        }
    }

    /// Returns the focused field.
    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Returns the skill under the checkbox cursor.
    pub fn skill_cursor(&self) -> Skill {
        Skill::all()[self.skill_cursor]
    }

    /// Moves focus back to the first field and the skill cursor to the first skill.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Builds the form rows for the current record and errors.
    pub fn build_form(&self, form: &FormState) -> Form {
        let record = form.record();
        let fields = visible_fields(record.position_applying_for);
        let focus = fields.iter().position(|f| *f == self.focus).unwrap_or(0);

        let rows = fields
            .iter()
            .map(|&field| {
                let label = match field {
                    Field::PreferredInterviewTime => format!(
                        "{} from {}",
                        field.label(),
                        form.earliest_interview_time().format(INTERVIEW_TIME_FORMAT)
                    ),
                    _ => field.label().to_string(),
                };
                let row = FormField::new(label, true)
                    .with_error(form.errors().get(field).map(ToString::to_string));
                match field {
                    Field::PositionApplyingFor => {
                        let current = record
                            .position_applying_for
                            .map_or(NO_POSITION, |p| p.as_str());
                        row.with_value(format!("\u{25c0} {current} \u{25b6}"))
                            .without_cursor()
                    }
                    Field::AdditionalSkills => row
                        .with_value(self.skills_line(form, field == self.focus))
                        .without_cursor(),
                    other => {
                        let value = other
                            .as_text()
                            .map(|t| record.text(t))
                            .unwrap_or_default();
                        row.with_value(value)
                    }
                }
            })
            .collect();

        Form::new(rows, focus)
    }

    fn skills_line(&self, form: &FormState, focused: bool) -> String {
        Skill::all()
            .iter()
            .enumerate()
            .map(|(i, skill)| {
                let mark = if form.record().has_skill(*skill) { 'x' } else { ' ' };
                let pointer = if focused && i == self.skill_cursor {
                    '>'
                } else {
                    ' '
                };
                format!("{pointer}[{mark}] {skill}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn focus_step(&mut self, form: &FormState, forward: bool) {
        let fields = visible_fields(form.record().position_applying_for);
        self.focus = cycle(&fields, self.focus, forward);
    }

    /// Handles keys that act on the focused field.
    fn handle_field_key(&mut self, form: &FormState, code: KeyCode) -> Action {
        let record = form.record();
        match self.focus {
            Field::PositionApplyingFor => {
                let forward = match code {
                    KeyCode::Right | KeyCode::Char(' ') => true,
                    KeyCode::Left => false,
                    _ => return Action::None,
                };
                let next = cycle(POSITION_OPTIONS, record.position_applying_for, forward);
                Action::Change(FieldChange::Position(next))
            }
            Field::AdditionalSkills => {
                let count = Skill::all().len();
                match code {
                    KeyCode::Right => {
                        self.skill_cursor = (self.skill_cursor + 1) % count;
                        Action::None
                    }
                    KeyCode::Left => {
                        self.skill_cursor = (self.skill_cursor + count - 1) % count;
                        Action::None
                    }
                    KeyCode::Char(' ') => {
                        let skill = self.skill_cursor();
                        Action::Change(FieldChange::Skill(skill, !record.has_skill(skill)))
                    }
                    _ => Action::None,
                }
            }
            field => {
                let Some(text) = field.as_text() else {
                    return Action::None;
                };
                let mut value = record.text(text).to_string();
                match code {
                    KeyCode::Char(ch) => value.push(ch),
                    KeyCode::Backspace => {
                        if value.pop().is_none() {
                            return Action::None;
                        }
                    }
                    _ => return Action::None,
                }
                Action::Change(FieldChange::Text(text, value))
            }
        }
    }
}

impl ScreenState for ApplicationFormState {
    fn handle_key(&mut self, form: &FormState, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_step(form, true);
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_step(form, false);
                Action::None
            }
            KeyCode::Enter => Action::Submit,
            KeyCode::Esc => match form.mode() {
                FormMode::EditingExisting => Action::Cancel,
                _ => Action::Quit,
            },
            code => self.handle_field_key(form, code),
        }
    }
}

/// Fields shown for the given position, in display order.
pub fn visible_fields(position: Option<Position>) -> Vec<Field> {
    Field::ALL
        .into_iter()
        .filter(|f| f.is_active_for(position))
        .collect()
}

/// Cycles through a slice to find the next or previous element.
fn cycle<T: PartialEq + Copy>(items: &[T], current: T, forward: bool) -> T {
    let pos = items.iter().position(|&x| x == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % items.len()
    } else {
        (pos + items.len() - 1) % items.len()
    };
    items[next]
}

/// Renders the application form screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_application_form(
    state: &ApplicationFormState,
    form: &FormState,
    frame: &mut Frame,
    area: Rect,
) {
    let editing = form.mode() == FormMode::EditingExisting;
    let title = if editing {
        " Edit Job Application "
    } else {
        " Job Application "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = state.build_form(form);
    let [form_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(rows.height()),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    draw_form(&rows, frame, form_area);

    let footer = if editing {
        "Tab: next  \u{2190}/\u{2192}: choose  Space: toggle  Enter: update  Esc: cancel  F1: help"
    } else {
        "Tab: next  \u{2190}/\u{2192}: choose  Space: toggle  Enter: submit  Esc: quit  F1: help"
    };
    let footer = Paragraph::new(Line::from(footer)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;
    use crate::model::{Clock, TextField};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn shift_press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::SHIFT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn new_form() -> FormState {
        FormState::frozen_at(
            NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )
    }

    /// Sends a key and applies any resulting field change, like the App does.
    fn send(state: &mut ApplicationFormState, form: &mut FormState, code: KeyCode) -> Action {
        let action = state.handle_key(form, press(code));
        if let Action::Change(change) = &action {
            let _ = form.set_field(change.clone());
        }
        action
    }

    fn type_string(state: &mut ApplicationFormState, form: &mut FormState, s: &str) {
        for ch in s.chars() {
            send(state, form, KeyCode::Char(ch));
        }
    }

    fn focus_on(state: &mut ApplicationFormState, form: &mut FormState, field: Field) {
        for _ in 0..Field::COUNT {
            if state.focus() == field {
                return;
            }
            send(state, form, KeyCode::Tab);
        }
        panic!("{field:?} is not visible");
    }

    fn fill_valid_developer(state: &mut ApplicationFormState, form: &mut FormState) {
        type_string(state, form, "Ann Lee");
        send(state, form, KeyCode::Tab);
        type_string(state, form, "ann@x.com");
        send(state, form, KeyCode::Tab);
        type_string(state, form, "5551234567");
        send(state, form, KeyCode::Tab);
        send(state, form, KeyCode::Right); // Developer
        send(state, form, KeyCode::Tab);
        type_string(state, form, "3");
        send(state, form, KeyCode::Tab);
        send(state, form, KeyCode::Char(' ')); // JavaScript
        send(state, form, KeyCode::Tab);
        type_string(state, form, "2030-01-01T10:00");
    }

    mod typing {
        use super::*;

        #[test]
        fn chars_fill_focused_field() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            type_string(&mut state, &mut form, "Ann");
            assert_eq!(form.record().full_name, "Ann");
        }

        #[test]
        fn chars_are_not_uppercased() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            send(&mut state, &mut form, KeyCode::Tab);
            type_string(&mut state, &mut form, "ann@x.com");
            assert_eq!(form.record().email, "ann@x.com");
        }

        #[test]
        fn backspace_deletes_char() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            type_string(&mut state, &mut form, "AB");
            send(&mut state, &mut form, KeyCode::Backspace);
            assert_eq!(form.record().full_name, "A");
        }

        #[test]
        fn backspace_on_empty_is_noop() {
            let mut state = ApplicationFormState::new();
            let form = new_form();
            let action = state.handle_key(&form, press(KeyCode::Backspace));
            assert_eq!(action, Action::None);
        }

        #[test]
        fn typing_emits_text_change() {
            let mut state = ApplicationFormState::new();
            let form = new_form();
            let action = state.handle_key(&form, press(KeyCode::Char('A')));
            assert_eq!(
                action,
                Action::Change(FieldChange::Text(TextField::FullName, "A".into()))
            );
        }

        #[test]
        fn unhandled_key_returns_none() {
            let mut state = ApplicationFormState::new();
            let form = new_form();
            let action = state.handle_key(&form, press(KeyCode::F(2)));
            assert_eq!(action, Action::None);
        }
    }

    mod tab_cycling {
        use super::*;

        #[test]
        fn without_position_skips_group_fields() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            let mut seen = vec![state.focus()];
            for _ in 0..5 {
                send(&mut state, &mut form, KeyCode::Tab);
                seen.push(state.focus());
            }
            assert_eq!(
                seen,
                vec![
                    Field::FullName,
                    Field::Email,
                    Field::PhoneNumber,
                    Field::PositionApplyingFor,
                    Field::AdditionalSkills,
                    Field::PreferredInterviewTime,
                ]
            );
            send(&mut state, &mut form, KeyCode::Tab);
            assert_eq!(state.focus(), Field::FullName);
        }

        #[test]
        fn designer_reveals_experience_and_portfolio() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::PositionApplyingFor);
            send(&mut state, &mut form, KeyCode::Right);
            send(&mut state, &mut form, KeyCode::Right);
            assert_eq!(form.record().position_applying_for, Some(Position::Designer));
            send(&mut state, &mut form, KeyCode::Tab);
            assert_eq!(state.focus(), Field::RelevantExperience);
            send(&mut state, &mut form, KeyCode::Tab);
            assert_eq!(state.focus(), Field::PortfolioUrl);
            send(&mut state, &mut form, KeyCode::Tab);
            assert_eq!(state.focus(), Field::AdditionalSkills);
        }

        #[test]
        fn backtab_wraps_to_last_field() {
            let mut state = ApplicationFormState::new();
            let form = new_form();
            state.handle_key(&form, shift_press(KeyCode::BackTab));
            assert_eq!(state.focus(), Field::PreferredInterviewTime);
        }

        #[test]
        fn up_and_down_move_focus() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            send(&mut state, &mut form, KeyCode::Down);
            assert_eq!(state.focus(), Field::Email);
            send(&mut state, &mut form, KeyCode::Up);
            assert_eq!(state.focus(), Field::FullName);
        }
    }

    mod position_selector {
        use super::*;

        #[test]
        fn right_cycles_through_positions() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::PositionApplyingFor);
            let mut seen = Vec::new();
            for _ in 0..4 {
                send(&mut state, &mut form, KeyCode::Right);
                seen.push(form.record().position_applying_for);
            }
            assert_eq!(
                seen,
                vec![
                    Some(Position::Developer),
                    Some(Position::Designer),
                    Some(Position::Manager),
                    None,
                ]
            );
        }

        #[test]
        fn left_from_unset_selects_manager() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::PositionApplyingFor);
            let action = send(&mut state, &mut form, KeyCode::Left);
            assert_eq!(
                action,
                Action::Change(FieldChange::Position(Some(Position::Manager)))
            );
        }

        #[test]
        fn space_moves_forward() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::PositionApplyingFor);
            send(&mut state, &mut form, KeyCode::Char(' '));
            assert_eq!(form.record().position_applying_for, Some(Position::Developer));
        }

        #[test]
        fn letters_do_nothing_on_selector() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::PositionApplyingFor);
            let action = send(&mut state, &mut form, KeyCode::Char('d'));
            assert_eq!(action, Action::None);
        }

        #[test]
        fn switching_position_clears_typed_experience() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::PositionApplyingFor);
            send(&mut state, &mut form, KeyCode::Right); // Developer
            send(&mut state, &mut form, KeyCode::Tab);
            type_string(&mut state, &mut form, "7");
            assert_eq!(form.record().relevant_experience, "7");
            send(&mut state, &mut form, KeyCode::BackTab);
            send(&mut state, &mut form, KeyCode::Right); // Designer
            assert_eq!(form.record().relevant_experience, "");
        }
    }

    mod skills {
        use super::*;

        #[test]
        fn space_toggles_skill_under_cursor() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::AdditionalSkills);
            send(&mut state, &mut form, KeyCode::Char(' '));
            assert_eq!(form.record().additional_skills, vec![Skill::JavaScript]);
            send(&mut state, &mut form, KeyCode::Char(' '));
            assert!(form.record().additional_skills.is_empty());
        }

        #[test]
        fn arrows_move_cursor_and_wrap() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::AdditionalSkills);
            send(&mut state, &mut form, KeyCode::Right);
            assert_eq!(state.skill_cursor(), Skill::Css);
            send(&mut state, &mut form, KeyCode::Left);
            send(&mut state, &mut form, KeyCode::Left);
            assert_eq!(state.skill_cursor(), Skill::Rust);
        }

        #[test]
        fn ticked_order_is_kept() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::AdditionalSkills);
            send(&mut state, &mut form, KeyCode::Right);
            send(&mut state, &mut form, KeyCode::Right);
            send(&mut state, &mut form, KeyCode::Char(' ')); // Python
            send(&mut state, &mut form, KeyCode::Left);
            send(&mut state, &mut form, KeyCode::Left);
            send(&mut state, &mut form, KeyCode::Char(' ')); // JavaScript
            assert_eq!(
                form.record().additional_skills,
                vec![Skill::Python, Skill::JavaScript]
            );
        }
    }

    mod submit_and_cancel {
        use super::*;

        #[test]
        fn enter_requests_submit() {
            let mut state = ApplicationFormState::new();
            let form = new_form();
            assert_eq!(state.handle_key(&form, press(KeyCode::Enter)), Action::Submit);
        }

        #[test]
        fn filled_form_submits() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            fill_valid_developer(&mut state, &mut form);
            assert_eq!(form.submit(), Ok(()));
            assert_eq!(form.record().relevant_experience, "3");
        }

        #[test]
        fn esc_on_fresh_form_quits() {
            let mut state = ApplicationFormState::new();
            let form = new_form();
            assert_eq!(state.handle_key(&form, press(KeyCode::Esc)), Action::Quit);
        }

        #[test]
        fn esc_while_editing_cancels() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            fill_valid_developer(&mut state, &mut form);
            form.submit().unwrap();
            form.edit().unwrap();
            assert_eq!(state.handle_key(&form, press(KeyCode::Esc)), Action::Cancel);
        }
    }

    mod build {
        use super::*;

        #[test]
        fn rows_follow_visible_fields() {
            let state = ApplicationFormState::new();
            let mut form = new_form();
            form.set_position(Some(Position::Manager)).unwrap();
            let rows = state.build_form(&form);
            let labels: Vec<&str> = rows.fields().iter().map(|f| f.label.as_str()).collect();
            assert!(labels.contains(&"Management Experience"));
            assert!(!labels.contains(&"Portfolio URL"));
            assert_eq!(labels.len(), 7);
        }

        #[test]
        fn errors_attach_to_rows() {
            let state = ApplicationFormState::new();
            let mut form = new_form();
            let _ = form.submit();
            let rows = state.build_form(&form);
            assert_eq!(
                rows.fields()[0].error.as_deref(),
                Some("Full Name is required")
            );
        }

        #[test]
        fn interview_row_shows_current_bound() {
            let state = ApplicationFormState::new();
            let mut form = new_form();
            let rows = state.build_form(&form);
            assert!(rows.fields()[5].label.ends_with("from 2026-10-16T09:30"));

            form.set_clock(Clock::Fixed(
                NaiveDate::from_ymd_opt(2026, 10, 16)
                    .unwrap()
                    .and_hms_opt(14, 5, 59)
                    .unwrap(),
            ));
            let rows = state.build_form(&form);
            assert!(rows.fields()[5].label.ends_with("from 2026-10-16T14:05"));
        }

        #[test]
        fn unset_position_shows_placeholder() {
            let state = ApplicationFormState::new();
            let rows = state.build_form(&new_form());
            assert!(rows.value(3).contains(NO_POSITION));
        }

        #[test]
        fn skills_row_marks_ticked_and_cursor() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::AdditionalSkills);
            send(&mut state, &mut form, KeyCode::Char(' '));
            let rows = state.build_form(&form);
            let skills = rows.value(rows.focus());
            assert!(skills.starts_with(">[x] JavaScript"), "got {skills:?}");
            assert!(skills.contains(" [ ] CSS"));
        }

        #[test]
        fn visible_fields_for_developer() {
            assert_eq!(
                visible_fields(Some(Position::Developer)),
                vec![
                    Field::FullName,
                    Field::Email,
                    Field::PhoneNumber,
                    Field::PositionApplyingFor,
                    Field::RelevantExperience,
                    Field::AdditionalSkills,
                    Field::PreferredInterviewTime,
                ]
            );
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn reset_returns_focus_to_first_field() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            focus_on(&mut state, &mut form, Field::AdditionalSkills);
            send(&mut state, &mut form, KeyCode::Right);
            state.reset();
            assert_eq!(state.focus(), Field::FullName);
            assert_eq!(state.skill_cursor(), Skill::JavaScript);
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render(state: &ApplicationFormState, form: &FormState) -> String {
            let backend = TestBackend::new(100, 34);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    draw_application_form(state, form, frame, frame.area());
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn renders_title_and_fields() {
            let output = render(&ApplicationFormState::new(), &new_form());
            assert!(output.contains("Job Application"), "should show title");
            assert!(output.contains("Full Name"), "should show name field");
            assert!(output.contains("Select Position"), "should show placeholder");
            assert!(output.contains("Enter: submit"), "should show footer");
        }

        #[test]
        fn renders_edit_title_and_cancel() {
            let mut state = ApplicationFormState::new();
            let mut form = new_form();
            fill_valid_developer(&mut state, &mut form);
            form.submit().unwrap();
            form.edit().unwrap();
            let output = render(&state, &form);
            assert!(output.contains("Edit Job Application"), "should show edit title");
            assert!(output.contains("Esc: cancel"), "should offer cancel");
            assert!(output.contains("Relevant Experience"), "should show group field");
        }

        #[test]
        fn renders_errors() {
            let mut form = new_form();
            let _ = form.submit();
            let output = render(&ApplicationFormState::new(), &form);
            assert!(output.contains("Email is required"), "should render error");
        }
    }
}
