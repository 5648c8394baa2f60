//! CSV scanning for the spreadsheet export feeds.
//!
//! Both remote feeds (administrative hierarchy and submission log) arrive as
//! the sheet's CSV export. The free-text columns routinely carry commas,
//! quotes and line breaks, so a plain line/comma split corrupts rows. This
//! scanner handles the quoting rules in a single left-to-right pass and is
//! the one implementation shared by every row-mapping call site.

/// Parse raw CSV text into rows of trimmed cells.
///
/// Quoting rules:
/// - `"` toggles quote mode; a doubled `""` inside quotes is a literal quote.
/// - `,` outside quotes ends the current cell.
/// - `\n` (or `\r\n`, treated as one terminator) outside quotes ends the
///   current row; rows that accumulated no content are not emitted, which
///   guards against trailing blank lines.
/// - Everything inside quotes is literal, including commas and newlines.
///
/// A trailing row without a final terminator is still emitted when non-empty.
/// An unterminated quote is not an error: the remainder of the text is
/// treated as still quoted and lands in the final cell.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut row_started = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(ch);
            }
            continue;
        }

        match ch {
            '"' => {
                in_quotes = true;
                row_started = true;
            }
            ',' => {
                row.push(cell.trim().to_string());
                cell.clear();
                row_started = true;
            }
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if row_started {
                    row.push(cell.trim().to_string());
                    rows.push(std::mem::take(&mut row));
                }
                cell.clear();
                row_started = false;
            }
            _ => {
                cell.push(ch);
                if !ch.is_whitespace() {
                    row_started = true;
                }
            }
        }
    }

    if row_started {
        row.push(cell.trim().to_string());
        rows.push(row);
    }

    rows
}
