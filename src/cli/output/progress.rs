//! Spinner shown while a menu fetch is in flight.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner:.green} {msg}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a spinner with a message, drawn to stderr.
///
/// Hidden in JSON mode so stdout and stderr stay free of terminal control codes.
pub fn create_spinner_with_message(message: impl Into<String>, hidden: bool) -> ProgressBar {
    let spinner = if hidden {
        ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
    } else {
        ProgressBar::new_spinner()
    };

    let style = ProgressStyle::default_spinner()
        .template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_CHARS);
    spinner.set_style(style);
    spinner.set_message(message.into());
    if !hidden {
        spinner.enable_steady_tick(Duration::from_millis(80));
    }
    spinner
}
