//! Terminal rendering of progress events

use crate::output::traits::{ProgressEvent, ProgressSink};
use colored::{ColoredString, Colorize};

/// Prints every event as one depth-indented, coloured line on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    fn render(event: &ProgressEvent) -> String {
        let indent = " ".repeat(event.depth() as usize * 2);
        let text = event.to_string();
        let line = match event {
            ProgressEvent::Enumerating { .. } | ProgressEvent::Listing { .. } => {
                text.as_str().green()
            }
            ProgressEvent::NoResponse { .. }
            | ProgressEvent::ListingFailed { .. }
            | ProgressEvent::NoLinks { .. }
            | ProgressEvent::NoEntries { .. } => text.as_str().yellow(),
            ProgressEvent::Confirmed {
                candidate, signals, ..
            } => {
                return format!(
                    "{}{} {}  {}",
                    indent,
                    "[ OK ]".green(),
                    candidate,
                    format!("({})", signals).as_str().bright_black()
                )
            }
            ProgressEvent::Descending { .. } => text.as_str().purple(),
            ProgressEvent::File { name, .. } => {
                return format!("{}  {}", indent, color_for_file(name));
            }
        };
        format!("{}{}", indent, line)
    }
}

impl ProgressSink for ConsoleSink {
    fn emit(&self, event: ProgressEvent) {
        println!("{}", Self::render(&event));
    }
}

/// Colours a listed file name by its extension
fn color_for_file(name: &str) -> ColoredString {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "c" | "h" | "cpp" | "hpp" | "rs" => name.blue(),
        "sh" | "py" | "pl" | "rb" => name.green(),
        "txt" | "md" => name.yellow(),
        "zip" | "tar" | "gz" | "rar" => name.red(),
        "json" | "xml" => name.cyan(),
        "jpg" | "png" | "gif" => name.magenta(),
        _ => name.bright_black(),
    }
}
