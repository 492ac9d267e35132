#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod cli;

use std::io::{self, stdout};

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use jobform::logging::{LogConfig, init_logging};
use jobform::model::FormState;
use jobform::tui::{App, AppError};

use crate::cli::Cli;

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_config = LogConfig::default()
        .with_level(cli.log_level.into())
        .with_log_file(cli.log_file.clone());
    init_logging(&log_config)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(FormState::new());
    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    result?;
    restore_result?;

    if cli.print_json {
        print_submission(&app.into_form())?;
    }
    Ok(())
}

/// Prints the submitted snapshot, if any, as pretty JSON.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn print_submission(form: &FormState) -> Result<(), AppError> {
    if let Some(record) = form.submitted() {
        println!("{}", serde_json::to_string_pretty(record)?);
    }
    Ok(())
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
