//! .NET style date/time format strings
//!
//! Build pipelines describe the build stamp with .NET custom format strings
//! (`yyyy-MM-dd HH:mm:ss`). They are translated to chrono's strftime syntax.
//! Fractions of a second round up to milli, micro or nanosecond precision.

use std::fmt::Write;

use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};

use crate::{Error, Result};

/// Translate a .NET custom format string to a strftime string.
pub fn to_strftime(format: &str) -> Result<String> {
    let invalid = |reason: &str| Error::InvalidFormat {
        format: format.to_string(),
        reason: reason.to_string(),
    };

    let chars: Vec<char> = format.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        match c {
            'y' => out.push_str(match run {
                1 => "%-y",
                2 => "%y",
                _ => "%Y",
            }),
            'M' => out.push_str(match run {
                1 => "%-m",
                2 => "%m",
                3 => "%b",
                _ => "%B",
            }),
            'd' => out.push_str(match run {
                1 => "%-d",
                2 => "%d",
                3 => "%a",
                _ => "%A",
            }),
            'H' => out.push_str(if run == 1 { "%-H" } else { "%H" }),
            'h' => out.push_str(if run == 1 { "%-I" } else { "%I" }),
            'm' => out.push_str(if run == 1 { "%-M" } else { "%M" }),
            's' => out.push_str(if run == 1 { "%-S" } else { "%S" }),
            'f' | 'F' => out.push_str(match run {
                1..=3 => "%3f",
                4..=6 => "%6f",
                _ => "%9f",
            }),
            't' => out.push_str("%p"),
            'z' | 'K' => return Err(invalid("time zone specifiers are not supported")),
            '\'' | '"' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&q| q == c)
                    .ok_or_else(|| invalid("unterminated quoted text"))?;
                for &literal in &chars[i + 1..i + 1 + close] {
                    push_literal(&mut out, literal);
                }
                i += close + 2;
                continue;
            }
            '\\' => {
                let escaped = chars
                    .get(i + 1)
                    .ok_or_else(|| invalid("trailing escape character"))?;
                push_literal(&mut out, *escaped);
                i += 2;
                continue;
            }
            _ => {
                for _ in 0..run {
                    push_literal(&mut out, c);
                }
            }
        }
        i += run;
    }

    if StrftimeItems::new(&out).any(|item| matches!(item, Item::Error)) {
        return Err(invalid("not representable"));
    }
    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Format `value` with a .NET custom format string.
pub fn format_datetime(value: &NaiveDateTime, format: &str) -> Result<String> {
    let strftime = to_strftime(format)?;
    let mut out = String::new();
    write!(out, "{}", value.format(&strftime)).map_err(|_| Error::InvalidFormat {
        format: format.to_string(),
        reason: "could not be rendered".to_string(),
    })?;
    Ok(out)
}
