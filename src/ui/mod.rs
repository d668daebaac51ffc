//! UI-Layer für die Konsole.
//!
//! Zeilen von stdin werden in `AppIntent`s bzw. Zeiger-Samples übersetzt;
//! Ring und Status werden als Text ausgegeben.

mod console;
mod view;

pub use console::{
    parse_line, tokenize, ConsoleError, ConsoleInput, DEFAULT_HISTORY_LEN, HELP_TEXT,
};
pub use view::{render_history, render_ring, render_status};
