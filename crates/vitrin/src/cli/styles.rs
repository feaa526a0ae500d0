//! Terminal styles, by meaning rather than by color. `console` drops the color
//! codes itself when stdout is not a terminal.

use console::Style;
use vitrinapp::commands::MessageLevel;

pub fn header() -> Style {
    Style::new().bold()
}

pub fn muted() -> Style {
    Style::new().dim()
}

pub fn slot() -> Style {
    Style::new().yellow().bold()
}

pub fn message(level: MessageLevel) -> Style {
    match level {
        MessageLevel::Info => Style::new().cyan(),
        MessageLevel::Success => Style::new().green(),
        MessageLevel::Warning => Style::new().yellow(),
    }
}
