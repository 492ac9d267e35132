//! Status bar widget: one line showing where the application stands.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{FormMode, FormState};

/// Data passed to the status bar widget; decoupled from [`FormState`] so it
/// can be built and tested on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// The form's current mode.
    pub mode: FormMode,
    /// Number of fields that failed the last submission attempt.
    pub error_count: usize,
}

impl StatusBarContext {
    /// Captures the status of a form.
    pub fn from_form(form: &FormState) -> Self {
        Self {
            mode: form.mode(),
            error_count: form.errors().len(),
        }
    }
}

/// Short label for each mode.
pub fn mode_label(mode: FormMode) -> &'static str {
    match mode {
        FormMode::EditingFresh => "New application",
        FormMode::Submitted => "Submitted",
        FormMode::EditingExisting => "Editing submission",
    }
}

/// Renders a one-line status bar.
///
/// Display format:
/// - `New application`
/// - `Editing submission  2 errors` (count in Red)
/// - `Submitted` (in Green)
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let green = Style::default().fg(Color::Green);
    let red = Style::default().fg(Color::Red);

    let mode_style = if ctx.mode == FormMode::Submitted {
        green
    } else {
        cyan
    };
    let mut spans = vec![Span::styled(mode_label(ctx.mode), mode_style)];

    match ctx.error_count {
        0 => {}
        1 => spans.push(Span::styled("  1 error", red)),
        n => spans.push(Span::styled(format!("  {n} errors"), red)),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
