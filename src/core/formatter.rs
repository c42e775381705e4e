//! Template rendering
//!
//! Pure functions from a [`Record`] and its template snapshot to the final
//! output line. Recognized placeholders:
//!
//! | token | substitution |
//! |---|---|
//! | `%(LEVEL)` | three-letter level tag |
//! | `%(FILENAME)` | source file |
//! | `%(FUNCNAME)` | function path |
//! | `%(LINE)` | source line |
//! | `%(MSG)` | message text |
//! | `%(PID)` | process id |
//! | `%(TID)` | thread id hash, uppercase hex |
//! | `%(DATE)` | `YYYY-MM-DD` |
//! | `%(TIME)` | `HH:MM:SS.<nanoseconds>` |
//! | `%(MSG_ID)` | monotonic message id |
//!
//! Anything else in the template is copied verbatim. Values whose
//! formatting has a cost (pid, tid, date, time, line, msg id) are only
//! computed when the template actually contains their token.

use super::record::Record;
use chrono::Timelike;
use colored::Colorize;

/// Template used until `set_format_str` is called.
pub const DEFAULT_FORMAT: &str = "[%(LEVEL)] %(FILENAME): %(LINE): %(MSG)";

/// Render a record against its template snapshot, without newline or color.
pub fn render(record: &Record) -> String {
    let template: &str = record.template.as_ref();
    let mut line = template.to_string();

    substitute(&mut line, "%(LEVEL)", record.level.to_tag());
    substitute(&mut line, "%(FILENAME)", record.file);
    substitute(&mut line, "%(FUNCNAME)", record.function);

    if template.contains("%(PID)") {
        substitute(&mut line, "%(PID)", &record.pid.to_string());
    }
    if template.contains("%(TID)") {
        substitute(&mut line, "%(TID)", &format!("{:X}", record.thread_hash));
    }
    if template.contains("%(DATE)") {
        let date = record.timestamp.format("%Y-%m-%d").to_string();
        substitute(&mut line, "%(DATE)", &date);
    }
    if template.contains("%(TIME)") {
        let time = format!(
            "{}.{}",
            record.timestamp.format("%H:%M:%S"),
            record.timestamp.nanosecond()
        );
        substitute(&mut line, "%(TIME)", &time);
    }
    if template.contains("%(LINE)") {
        substitute(&mut line, "%(LINE)", &record.line.to_string());
    }
    if template.contains("%(MSG_ID)") {
        substitute(&mut line, "%(MSG_ID)", &record.msg_id.to_string());
    }

    // Last, so tokens inside the message text are never re-substituted
    substitute(&mut line, "%(MSG)", &record.message);

    line
}

/// Render the full output line: substitution, trailing newline, and the
/// color wrap when the record's color snapshot is enabled, the level has a
/// color, and the destination is an interactive terminal.
pub fn render_line(record: &Record) -> String {
    let mut line = render(record);
    line.push('\n');

    if record.colored && record.destination.is_terminal() {
        if let Some(color) = record.color {
            line = line.as_str().color(color).to_string();
        }
    }
    line
}

/// Replace every occurrence of `token`, scanning left to right.
///
/// Substituted text is never rescanned, so a value containing a
/// placeholder token is emitted verbatim.
fn substitute(line: &mut String, token: &str, value: &str) {
    let mut from = 0;
    while let Some(found) = line[from..].find(token) {
        let at = from + found;
        line.replace_range(at..at + token.len(), value);
        from = at + value.len();
    }
}
