use std::fmt;
use serde::Serialize;
use thiserror::Error;

pub const COMMENT_MARKER: char = '#';
pub const FIELD_DELIMITER: char = '|';
pub const TIME_UNIT: char = 's';
pub const SIZE_UNIT: char = 'B';

/// One line of a benchmark file, before it is tagged with a method.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Measurement {
    pub index: u64,
    pub elapsed_seconds: f64,
    pub size_bytes: u64,
}

/// Writes the canonical `index | seconds s | bytes B` line that `parse` reads back.
impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{} {} {}{}",
            self.index, FIELD_DELIMITER, self.elapsed_seconds, TIME_UNIT, FIELD_DELIMITER, self.size_bytes, SIZE_UNIT
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line_number}: {kind} (in {line:?})")]
pub struct FormatError {
    /// 1-based, counting comment and blank lines.
    pub line_number: usize,
    pub line: String,
    pub kind: FormatErrorKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatErrorKind {
    #[error("expected 3 '|'-separated fields, found {0}")]
    FieldCount(usize),
    #[error("invalid index {0:?}")]
    Index(String),
    #[error("{field:?} is missing the '{unit}' unit suffix")]
    MissingUnit { field: String, unit: char },
    #[error("invalid {what} value {value:?}")]
    Number { what: &'static str, value: String },
}

/// Parse the text of one benchmark file, keeping file order.
///
/// A `#` starts a comment running to end of line; lines that are blank once the
/// comment is removed are skipped. Every other line must hold exactly three fields.
pub fn parse(raw: &str) -> Result<Vec<Measurement>, FormatError> {
    let mut out = Vec::new();

    for (i, line) in raw.lines().enumerate() {
        // strip trailing comment, then skip what is left if blank
        let content = match line.find(COMMENT_MARKER) {
            Some(pos) => &line[..pos],
            None => line,
        };
        if content.trim().is_empty() {
            continue;
        }

        let fail = |kind| FormatError { line_number: i + 1, line: line.to_string(), kind };

        let fields: Vec<&str> = content.split(FIELD_DELIMITER).map(str::trim).collect();
        let [index, seconds, bytes] = fields.as_slice() else {
            return Err(fail(FormatErrorKind::FieldCount(fields.len())));
        };

        let index = index
            .parse::<u64>()
            .map_err(|_| fail(FormatErrorKind::Index(index.to_string())))?;
        // NaN, inf and negative times are rejected
        let elapsed_seconds = strip_unit(seconds, TIME_UNIT)
            .map_err(fail)?
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| fail(FormatErrorKind::Number { what: "time", value: seconds.to_string() }))?;
        let size_bytes = strip_unit(bytes, SIZE_UNIT)
            .map_err(fail)?
            .parse::<u64>()
            .map_err(|_| fail(FormatErrorKind::Number { what: "size", value: bytes.to_string() }))?;

        out.push(Measurement { index, elapsed_seconds, size_bytes });
    }

    Ok(out)
}

fn strip_unit(field: &str, unit: char) -> Result<&str, FormatErrorKind> {
    field
        .strip_suffix(unit)
        .map(str::trim_end)
        .ok_or_else(|| FormatErrorKind::MissingUnit { field: field.to_string(), unit })
}
