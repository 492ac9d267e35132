//! Summary screen: read-only view of the submitted application.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{ApplicationRecord, Field, FormState};
use crate::tui::action::{Action, ScreenState};

/// State for the summary screen. It has nothing to track; the content comes
/// from the form's submitted snapshot.
#[derive(Debug, Clone, Default)]
pub struct SummaryState;

impl ScreenState for SummaryState {
    fn handle_key(&mut self, _form: &FormState, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('e') | KeyCode::Enter => Action::Edit,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }
}

/// Label and value pairs shown for a record, in display order.
///
/// Position-dependent entries only appear for the positions that use them.
pub fn summary_lines(record: &ApplicationRecord) -> Vec<(&'static str, String)> {
    let position = record.position_applying_for;
    let mut lines = vec![
        (Field::FullName.name(), record.full_name.clone()),
        (Field::Email.name(), record.email.clone()),
        (Field::PhoneNumber.name(), record.phone_number.clone()),
        (
            Field::PositionApplyingFor.name(),
            position.map(|p| p.to_string()).unwrap_or_default(),
        ),
    ];

    if Field::RelevantExperience.is_active_for(position) {
        lines.push((
            Field::RelevantExperience.name(),
            format!("{} years", record.relevant_experience),
        ));
    }
    if Field::PortfolioUrl.is_active_for(position) {
        lines.push((Field::PortfolioUrl.name(), record.portfolio_url.clone()));
    }
    if Field::ManagementExperience.is_active_for(position) {
        lines.push((
            Field::ManagementExperience.name(),
            record.management_experience.clone(),
        ));
    }

    let skills = record
        .additional_skills
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    lines.push((Field::AdditionalSkills.name(), skills));
    lines.push((
        Field::PreferredInterviewTime.name(),
        record.preferred_interview_time.clone(),
    ));
    lines
}

/// Renders the summary of the submitted snapshot.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_summary(form: &FormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Submission Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let label_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let record = form.submitted().unwrap_or(form.record());
    let lines: Vec<Line> = summary_lines(record)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), label_style),
                Span::raw(value),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), content_area);

    let footer = Paragraph::new("e/Enter: edit  q/Esc: quit  F1: help")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
