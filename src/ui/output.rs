//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Results go to stdout, errors to stderr. Rendering functions return
//! strings so the exact layout can be tested without capturing stdout.

use std::fmt::Display;

use crate::remote::{CommandCatalog, PluginCommands};

/// Shown when the server exposes nothing to list.
pub const NO_COMMANDS: &str = "No commands available";

const PLUGIN_INDENT: &str = "  ";
const COMMAND_INDENT: &str = "        ";
const COLUMN_GAP: &str = "   ";

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("Error: {}", message);
}

/// Render every plugin's commands, plugins and commands sorted by name.
pub fn render_catalog(catalog: &CommandCatalog) -> String {
    if catalog.is_empty() {
        return format!("{}\n", NO_COMMANDS);
    }

    catalog
        .iter()
        .map(|(plugin, commands)| render_plugin(plugin, commands))
        .collect()
}

/// Render one plugin's commands.
///
/// ```text
///   deploy
///         rollback   Roll back to the previous release
///         trigger    Start a deployment
/// ```
///
/// Command names are padded to the longest one; continuation lines of a
/// multi-line description stay indented under the command column.
pub fn render_plugin(plugin: &str, commands: &PluginCommands) -> String {
    let width = commands
        .keys()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("{}{}\n", PLUGIN_INDENT, plugin);
    for (name, description) in commands {
        let description = description.replace('\n', &format!("\n{}", COMMAND_INDENT));
        out.push_str(&format!(
            "{}{:<width$}{}{}\n",
            COMMAND_INDENT,
            name,
            COLUMN_GAP,
            description,
            width = width
        ));
    }
    out
}
