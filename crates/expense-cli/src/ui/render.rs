//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Expense · command (context)"
/// Plain mode: "expense command"
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Expense", styles::bold(), ctx.color);
            match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
        OutputMode::Plain => format!("expense {}", command),
        OutputMode::Json => String::new(),
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let badge_text = kind.display(ctx.unicode);
    let colored_badge = styled(badge_text, kind.style(), ctx.color);

    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Column definition for table rendering.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub right_aligned: bool,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            right_aligned: false,
        }
    }

    /// Numeric column.
    pub const fn right(header: &'static str) -> Self {
        Self {
            header,
            right_aligned: true,
        }
    }
}

/// Render a table.
///
/// Pretty mode: bordered comfy-table; rows whose index is in `highlighted`
/// are drawn green and bold when color is on.
/// Plain mode: space-separated values, no header.
pub fn table(
    ctx: &UiContext,
    columns: &[Column],
    rows: &[Vec<String>],
    highlighted: &[usize],
) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|c| {
            let cell = Cell::new(c.header);
            if ctx.color {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header_cells);

    for (index, row) in rows.iter().enumerate() {
        let highlight = ctx.color && highlighted.contains(&index);
        let cells: Vec<Cell> = row
            .iter()
            .map(|value| {
                let cell = Cell::new(value);
                if highlight {
                    cell.fg(Color::Green).add_attribute(Attribute::Bold)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(cells);
    }

    for (i, col) in columns.iter().enumerate() {
        if col.right_aligned {
            if let Some(column) = table.column_mut(i) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
    }

    table.to_string()
}

/// Print a message to stdout unless in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
/// JSON mode: one `{"error": ..., "hint": ...}` object
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Json => serde_json::json!({ "error": message, "hint": error_hint }).to_string(),
        OutputMode::Pretty => {
            let mut lines = vec![badge(ctx, Badge::Err, message)];
            if let Some(h) = error_hint {
                lines.push(hint(ctx, h));
            }
            lines.join("\n")
        }
        OutputMode::Plain => {
            let mut lines = vec![format!("error={}", message)];
            if let Some(h) = error_hint {
                lines.push(format!("hint={}", h));
            }
            lines.join("\n")
        }
    }
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}
