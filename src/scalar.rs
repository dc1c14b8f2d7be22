//! Scalar coders
//!
//! Convert domain scalars (currency, percentage, date, integer) to and from the
//! human-readable text stored in report cells. Decoding never fails: empty,
//! `N/A`, or non-numeric input comes back as `None`.

use std::fmt;

/// Raw cell as read from a CSV field or a spreadsheet cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// True for empty cells and whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// Plain number text: `50`, `12.5`
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{}", n)
}

/// `$` followed by the comma-grouped amount. `None` encodes as empty text.
pub fn encode_currency(value: Option<f64>) -> String {
    match value {
        Some(n) => format!("${}", grouped(n)),
        None => String::new(),
    }
}

/// Strip `$` and grouping commas, then parse. Empty or `N/A` is `None`.
pub fn decode_currency(cell: &CellValue) -> Option<f64> {
    let text = cell.to_string();
    let text = text.trim();
    if text.is_empty() || text == "N/A" {
        return None;
    }
    leading_float(&text.replace(['$', ','], ""))
}

/// Number with a trailing `%`. `None` encodes as empty text.
pub fn encode_percentage(value: Option<f64>) -> String {
    match value {
        Some(n) => format!("{}%", format_number(n)),
        None => String::new(),
    }
}

/// Strip the `%` sign, then parse. Values outside 0-100 are kept as-is.
pub fn decode_percentage(cell: &CellValue) -> Option<f64> {
    let text = cell.to_string();
    let text = text.trim();
    if text.is_empty() || text == "N/A" {
        return None;
    }
    leading_float(&text.replacen('%', "", 1))
}

/// Dates are ISO strings already; encoding is a passthrough.
pub fn encode_date(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

pub fn decode_date(cell: &CellValue) -> Option<String> {
    if cell.is_blank() {
        return None;
    }
    Some(cell.to_string())
}

/// Leading-integer parse: `"12.7"` is 12, `"abc"` is `None`.
pub fn decode_integer(cell: &CellValue) -> Option<i64> {
    let text = cell.to_string();
    let s = text.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Plain float parse with the same tolerance as the other decoders.
pub fn decode_number(cell: &CellValue) -> Option<f64> {
    if cell.is_blank() {
        return None;
    }
    leading_float(&cell.to_string())
}

/// Longest numeric prefix of `text` (`"12abc"` is 12). Never NaN or infinite.
fn leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        mantissa_digits += frac_digits;
        if mantissa_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// en-US style grouping with at most three fraction digits: `1234567.5` -> `1,234,567.5`
fn grouped(n: f64) -> String {
    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if n < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
