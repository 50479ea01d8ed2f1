//! Terminal output: notes, tables, and rendering of router output.

use switchyard_core::{DisplayItem, Outbound, ResponseEnvelope};

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

fn paint(style: &str, text: &str) -> String {
    if supports_color() {
        format!("{style}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm'
            for next in chars.by_ref() {
                if next == 'm' { break; }
            }
        } else {
            result.push(c);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Formatted notes
// ---------------------------------------------------------------------------

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

pub struct Column {
    pub header: String,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self { header: header.into() }
    }
}

/// Render a left-aligned table. Widths count visible characters only.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let num_cols = columns.len();
    let mut widths: Vec<usize> = columns.iter().map(|c| visible_width(&c.header)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(num_cols) {
            widths[i] = widths[i].max(visible_width(cell));
        }
    }

    let mut out = String::new();

    let header_cells: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| pad_cell(&col.header, widths[i]))
        .collect();
    out.push_str(&format!("  {}\n", paint(BOLD, header_cells.join("  ").trim_end())));

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}\n", sep.join("  ")));

    for row in rows {
        let cells: Vec<String> = (0..num_cols)
            .map(|i| pad_cell(row.get(i).map(String::as_str).unwrap_or(""), widths[i]))
            .collect();
        out.push_str(&format!("  {}\n", cells.join("  ").trim_end()));
    }

    out
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

fn pad_cell(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{s}{}", " ".repeat(pad))
}

// ---------------------------------------------------------------------------
// Router output
// ---------------------------------------------------------------------------

fn describe_item(item: &DisplayItem) -> String {
    match item {
        DisplayItem::Image { name, path } => format!("[image] {name} ({})", path.display()),
        DisplayItem::Document { name, path } => format!("[document] {name} ({})", path.display()),
        DisplayItem::InlineText { name, content } => {
            let preview: String = content.lines().next().unwrap_or("").chars().take(60).collect();
            format!("[text] {name}: {preview}")
        }
        DisplayItem::File { name, size_bytes, .. } => match size_bytes {
            Some(size) => format!("[file] {name} ({size} bytes)"),
            None => format!("[file] {name}"),
        },
        DisplayItem::Custom { component, props } => format!("[{component}] {props}"),
    }
}

pub fn render_envelope(envelope: &ResponseEnvelope) -> String {
    let mut out = format!("{}\n", envelope.text);
    for item in &envelope.display_items {
        out.push_str(&format!("  {}\n", paint(DIM, &describe_item(item))));
    }
    if !envelope.actions.is_empty() {
        let actions: Vec<String> = envelope
            .actions
            .iter()
            .map(|a| format!("!{} {}", a.id, a.label))
            .collect();
        out.push_str(&format!("  {}\n", paint(MAGENTA, &actions.join("   "))));
    }
    out
}

/// One line (or block) per transport call.
pub fn render_outbound(event: &Outbound) -> String {
    match event {
        Outbound::Profiles { profiles } => {
            let names: Vec<String> = profiles
                .iter()
                .map(|p| if p.is_default { format!("{} (default)", p.name) } else { p.name.clone() })
                .collect();
            format!("{} {}\n", paint(CYAN, "profiles:"), names.join(", "))
        }
        Outbound::Commands { commands, .. } => {
            let ids: Vec<String> = commands.iter().map(|c| format!("/{} {}", c.id, c.icon)).collect();
            format!("{} {}\n", paint(CYAN, "commands:"), ids.join("  "))
        }
        Outbound::Envelope { envelope, .. } => render_envelope(envelope),
        Outbound::SidePanel { items, .. } => {
            let mut out = format!("{}\n", paint(CYAN, "side panel:"));
            for item in items {
                out.push_str(&format!("  {}\n", describe_item(item)));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use switchyard_core::Action;

    #[test]
    fn strips_ansi() {
        let colored = format!("{GREEN}hello{RESET}");
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn renders_table() {
        let cols = vec![Column::left("Name"), Column::left("Icon")];
        let rows = vec![
            vec!["Alice".to_string(), "42".to_string()],
            vec!["Bob".to_string(), "7".to_string()],
        ];
        let table = strip_ansi(&render_table(&cols, &rows));
        assert!(table.contains("Alice  42"));
        assert!(table.contains("Bob    7"));
    }

    #[test]
    fn envelope_lists_actions_with_invocation_syntax() {
        let env = ResponseEnvelope::text("hi").with_action(Action::new("action_summary", "Summary", json!(null)));
        let out = strip_ansi(&render_envelope(&env));
        assert!(out.starts_with("hi\n"));
        assert!(out.contains("!action_summary Summary"));
    }
}
