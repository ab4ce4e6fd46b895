use std::fmt::Write;
use std::time::Duration;

/// Renders an elapsed time in the compact `72h3m0.5s` form.
///
/// Durations under a second switch to the largest sub-second unit that keeps the
/// leading digit non-zero (`1.5ms`, `250µs`, `12ns`). Trailing fractional zeros are
/// dropped and a zero duration is `0s`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    match nanos {
        0 => "0s".to_string(),
        1..=999 => format!("{nanos}ns"),
        1_000..=999_999 => format!("{}µs", decimal(nanos, 3)),
        1_000_000..=999_999_999 => format!("{}ms", decimal(nanos, 6)),
        _ => {
            let secs = nanos / 1_000_000_000;
            let hours = secs / 3600;
            let minutes = (secs / 60) % 60;
            let mut out = String::new();
            if hours > 0 {
                let _ = write!(out, "{hours}h");
            }
            if hours > 0 || minutes > 0 {
                let _ = write!(out, "{minutes}m");
            }
            let sub_minute = (secs % 60) * 1_000_000_000 + nanos % 1_000_000_000;
            let _ = write!(out, "{}s", decimal(sub_minute, 9));
            out
        }
    }
}

/// `value / 10^precision` as a decimal string with trailing zeros trimmed.
fn decimal(value: u128, precision: u32) -> String {
    let unit = 10u128.pow(precision);
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = precision as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Double-quotes a string, escaping quotes, backslashes and every non-printable character.
/// Non-printable runes use `\u` with four hex digits, or `\U` with eight above the BMP.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0B}' => out.push_str("\\v"),
            '\u{0C}' => out.push_str("\\f"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_ascii() || is_printable(c) => out.push(c),
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out.push('"');
    out
}

/// Letters, marks, numbers, punctuation and symbols. Format, private-use, unassigned,
/// separator and non-ASCII space characters are not printable.
fn is_printable(c: char) -> bool {
    // str escaping only escapes grapheme extenders in leading position, so pad with a space.
    let mut pair = String::with_capacity(5);
    pair.push(' ');
    pair.push(c);
    pair.escape_debug().nth(1) != Some('\\')
}
